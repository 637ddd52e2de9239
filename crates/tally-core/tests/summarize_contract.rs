//! Output contract of `summarize`: grouping, substitution, rollup and wire shape.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use tally_core::model::{Run, Spec, SpecStatus, Suite, Tag};
use tally_core::summarize;
use tally_core::summary::OverallStatus;

fn spec(status: &str, tags: &[(&str, &str)]) -> Spec {
    Spec::new(
        SpecStatus::parse(status),
        tags.iter().map(|(c, v)| Tag::new(*c, *v)).collect(),
    )
}

fn run_with(suites: Vec<Vec<Spec>>) -> Run {
    Run {
        branch: "main".into(),
        commit_sha: "abc123".into(),
        start_time: None,
        end_time: None,
        suites: suites
            .into_iter()
            .enumerate()
            .map(|(i, specs)| Suite {
                name: format!("suite-{i}"),
                tags: vec![],
                specs,
            })
            .collect(),
    }
}

fn by(cats: &[&str]) -> Vec<String> {
    cats.iter().map(|c| c.to_string()).collect()
}

#[test]
fn empty_input_is_na_placeholder() {
    let s = summarize(&[], "proj-123", "seed-456", &by(&["component"]));
    assert_eq!(
        serde_json::to_value(&s).unwrap(),
        serde_json::json!({
            "project_id": "proj-123",
            "seed": "seed-456",
            "branch": "NA",
            "status": "NA",
            "tests": 0,
            "summary": []
        })
    );
}

#[test]
fn single_category_grouping() {
    let run = run_with(vec![vec![
        spec("passed", &[("component", "auth")]),
        spec("failed", &[("component", "auth")]),
        spec("passed", &[("component", "api")]),
    ]]);
    let s = summarize(&[run], "p", "s", &by(&["component"]));
    let v = serde_json::to_value(&s).unwrap();

    assert_eq!(v["status"], "failed");
    assert_eq!(v["tests"], 3);
    assert_eq!(
        v["summary"],
        serde_json::json!([
            {"component": "api", "total": 1, "passed": 1},
            {"component": "auth", "total": 2, "passed": 1, "failed": 1}
        ])
    );
}

#[test]
fn multi_category_grouping_keeps_distinct_pairs() {
    let run = run_with(vec![
        vec![
            spec("passed", &[("component", "auth"), ("priority", "high")]),
            spec("passed", &[("component", "auth"), ("priority", "low")]),
        ],
        vec![
            spec("failed", &[("priority", "high"), ("component", "api")]),
            spec("skipped", &[("component", "auth"), ("priority", "high")]),
        ],
    ]);
    let s = summarize(&[run], "p", "s", &by(&["component", "priority"]));
    let keys: Vec<(String, String)> = s
        .groups
        .iter()
        .map(|g| {
            (
                g.value("component").unwrap().to_string(),
                g.value("priority").unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            ("api".to_string(), "high".to_string()),
            ("auth".to_string(), "high".to_string()),
            ("auth".to_string(), "low".to_string()),
        ]
    );
    assert_eq!(s.groups[1].counts.total, 2);
    assert_eq!(s.groups[1].counts.skipped, 1);
}

#[test]
fn output_key_order_follows_group_by() {
    let run = run_with(vec![vec![spec(
        "passed",
        &[("component", "auth"), ("priority", "high")],
    )]]);
    let s = summarize(&[run], "p", "s", &by(&["priority", "component"]));
    let json = serde_json::to_string(&s.groups[0]).unwrap();
    assert_eq!(
        json,
        r#"{"priority":"high","component":"auth","total":1,"passed":1}"#
    );
}

#[test]
fn missing_tag_becomes_unspecified() {
    let run = run_with(vec![vec![spec("passed", &[])]]);
    let s = summarize(&[run], "p", "s", &by(&["component"]));
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(
        v["summary"],
        serde_json::json!([{"component": "unspecified", "total": 1, "passed": 1}])
    );
}

#[test]
fn no_group_by_collapses_to_one_group() {
    let run = run_with(vec![
        vec![spec("passed", &[("component", "auth")])],
        vec![spec("pending", &[("component", "api")]), spec("failed", &[])],
    ]);
    let s = summarize(&[run], "p", "s", &[]);
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(
        v["summary"],
        serde_json::json!([{"total": 3, "passed": 1, "failed": 1, "pending": 1}])
    );
}

#[test]
fn skipped_and_pending_do_not_fail_status() {
    let run = run_with(vec![vec![spec("skipped", &[]), spec("pending", &[])]]);
    let s = summarize(&[run], "p", "s", &[]);
    assert_eq!(s.overall_status, OverallStatus::Passed);
    assert_eq!(serde_json::to_value(&s).unwrap()["status"], "passed");
}

#[test]
fn zero_times_are_absent_from_output() {
    let year_one = DateTime::parse_from_rfc3339("0001-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let mut run = run_with(vec![vec![spec("passed", &[])]]);
    run.start_time = Some(year_one);
    run.end_time = Some(year_one);
    let s = summarize(&[run], "p", "s", &[]);
    let v = serde_json::to_value(&s).unwrap();
    let obj = v.as_object().unwrap();
    assert!(!obj.contains_key("start_time"));
    assert!(!obj.contains_key("end_time"));
    assert_eq!(obj["sha"], "abc123");
}

#[test]
fn unix_epoch_is_a_real_time() {
    let mut run = run_with(vec![vec![spec("passed", &[])]]);
    run.end_time = DateTime::<Utc>::from_timestamp(0, 0);
    let v = serde_json::to_value(summarize(&[run], "p", "s", &[])).unwrap();
    assert_eq!(v["end_time"], "1970-01-01T00:00:00Z");
}

#[test]
fn time_span_uses_first_start_and_last_end() {
    let mut first = run_with(vec![vec![spec("passed", &[])]]);
    first.start_time = Some(DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap().into());
    let mut last = run_with(vec![vec![spec("passed", &[])]]);
    last.end_time = Some(DateTime::parse_from_rfc3339("2024-05-01T11:30:00.5Z").unwrap().into());
    let v = serde_json::to_value(summarize(&[first, last], "p", "s", &[])).unwrap();
    assert_eq!(v["start_time"], "2024-05-01T10:00:00Z");
    assert_eq!(v["end_time"], "2024-05-01T11:30:00Z");
}

#[test]
fn empty_sha_is_omitted() {
    let mut run = run_with(vec![vec![spec("passed", &[])]]);
    run.commit_sha.clear();
    let v = serde_json::to_value(summarize(&[run], "p", "s", &[])).unwrap();
    assert!(v.get("sha").is_none());
    assert_eq!(v["branch"], "main");
}

// --- properties over generated trees ---

fn arb_spec() -> impl Strategy<Value = Spec> {
    let status = prop_oneof![
        Just("passed"),
        Just("failed"),
        Just("skipped"),
        Just("pending"),
        Just("unknown"),
    ];
    let tag = (
        prop_oneof![Just("component"), Just("priority"), Just("team")],
        prop_oneof![Just("a"), Just("b"), Just("a|b"), Just("")],
    );
    (status, prop::collection::vec(tag, 0..4)).prop_map(|(status, tags)| spec(status, &tags))
}

fn arb_runs() -> impl Strategy<Value = Vec<Run>> {
    prop::collection::vec(
        prop::collection::vec(prop::collection::vec(arb_spec(), 0..6), 0..4).prop_map(run_with),
        0..4,
    )
}

fn arb_group_by() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![Just("component"), Just("priority"), Just("missing")],
        0..3,
    )
    .prop_map(|v| v.into_iter().map(String::from).collect())
}

proptest! {
    #[test]
    fn counts_are_conserved(runs in arb_runs(), group_by in arb_group_by()) {
        let s = summarize(&runs, "p", "s", &group_by);
        let visited: usize = runs.iter().map(Run::spec_count).sum();
        let grouped: u64 = s.groups.iter().map(|g| g.counts.total).sum();
        prop_assert_eq!(s.spec_count, visited as u64);
        prop_assert_eq!(grouped, s.spec_count);
        for g in &s.groups {
            prop_assert!(g.counts.bucketed() <= g.counts.total);
        }
    }

    #[test]
    fn every_group_carries_every_category(runs in arb_runs(), group_by in arb_group_by()) {
        let s = summarize(&runs, "p", "s", &group_by);
        for g in &s.groups {
            prop_assert_eq!(g.values.len(), group_by.len());
            for (i, category) in group_by.iter().enumerate() {
                prop_assert_eq!(&g.values[i].0, category);
            }
        }
    }

    #[test]
    fn groups_are_unique_and_sorted(runs in arb_runs(), group_by in arb_group_by()) {
        let s = summarize(&runs, "p", "s", &group_by);
        let keys: Vec<Vec<&str>> = s
            .groups
            .iter()
            .map(|g| g.values.iter().map(|(_, v)| v.as_str()).collect())
            .collect();
        for pair in keys.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn output_is_byte_identical_across_calls(runs in arb_runs(), group_by in arb_group_by()) {
        let a = serde_json::to_string(&summarize(&runs, "p", "s", &group_by)).unwrap();
        let b = serde_json::to_string(&summarize(&runs, "p", "s", &group_by)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn failed_status_iff_any_failed_spec(runs in arb_runs()) {
        let s = summarize(&runs, "p", "s", &[]);
        let any_failed = runs
            .iter()
            .flat_map(|r| r.suites.iter())
            .flat_map(|su| su.specs.iter())
            .any(|sp| sp.status == SpecStatus::Failed);
        if runs.is_empty() {
            prop_assert_eq!(s.overall_status, OverallStatus::NotAvailable);
        } else if any_failed {
            prop_assert_eq!(s.overall_status, OverallStatus::Failed);
        } else {
            prop_assert_eq!(s.overall_status, OverallStatus::Passed);
        }
    }
}
