//! Content tag for caching summaries: same inputs, same bytes, same tag.

use crate::summary::AggregatedSummary;
use sha2::{Digest, Sha256};

/// `sha256:<hex>` over the compact JSON encoding of `summary`.
pub fn summary_etag(summary: &AggregatedSummary) -> serde_json::Result<String> {
    let bytes = serde_json::to_vec(summary)?;
    Ok(format!("sha256:{}", hex::encode(Sha256::digest(&bytes))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etag_is_stable_and_content_sensitive() {
        let a = AggregatedSummary::not_available("p", "s");
        let b = AggregatedSummary::not_available("p", "s2");
        let tag = summary_etag(&a).unwrap();
        assert!(tag.starts_with("sha256:"));
        assert_eq!(tag.len(), "sha256:".len() + 64);
        assert_eq!(tag, summary_etag(&a.clone()).unwrap());
        assert_ne!(tag, summary_etag(&b).unwrap());
    }
}
