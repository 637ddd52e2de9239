pub mod schema;
pub mod store;

pub use store::{SeedRow, Store};
