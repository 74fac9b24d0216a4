//! Dashboard lifecycle tests: snapshot swap, selection persistence.

use chrono::{TimeZone, Utc};
use churnboard_core::{
    config::SimConfig,
    engine::Dashboard,
    store::DashStore,
};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn opens_on_baseline_snapshot_with_first_segment_selected() {
    let store = DashStore::in_memory().expect("in-memory store");
    let dash = Dashboard::open(SimConfig::default(), store, fixed_now()).expect("open");

    assert_eq!(dash.selected_segment_id(), "seg-001");
    assert_eq!(dash.snapshot().segments.len(), 3);
    // Baseline values, untouched by any simulation.
    assert_eq!(dash.selected_segment().total_customers, 12_450);
}

#[test]
fn refresh_replaces_the_snapshot_wholesale() {
    let store = DashStore::in_memory().expect("in-memory store");
    let mut dash = Dashboard::open(SimConfig::default(), store, fixed_now()).expect("open");

    let before = dash.snapshot().clone();
    dash.refresh(12345, fixed_now()).expect("refresh");
    let after = dash.snapshot();

    assert_ne!(&before, after, "refresh did not replace the snapshot");
    assert_eq!(after.seed, 12345);
    // Derived counts come from the classifier, not the baseline.
    assert_ne!(
        after.segment("seg-001").unwrap().total_customers,
        before.segment("seg-001").unwrap().total_customers
    );
}

#[test]
fn selection_is_validated_and_persisted() {
    let store = DashStore::in_memory().expect("in-memory store");
    let mut dash = Dashboard::open(SimConfig::default(), store, fixed_now()).expect("open");

    dash.select_segment("seg-003").expect("select");
    assert_eq!(dash.selected_segment_id(), "seg-003");

    assert!(
        dash.select_segment("seg-999").is_err(),
        "unknown id must be rejected"
    );
    assert_eq!(dash.selected_segment_id(), "seg-003");
}

#[test]
fn stored_selection_survives_restart_via_file_db() {
    let dir = std::env::temp_dir().join(format!("churnboard-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let db = dir.join("ui.db");
    let db = db.to_str().expect("utf8 path");

    {
        let store = DashStore::open(db).expect("open db");
        let mut dash = Dashboard::open(SimConfig::default(), store, fixed_now()).expect("open");
        dash.select_segment("seg-002").expect("select");
    }

    let store = DashStore::open(db).expect("reopen db");
    let dash = Dashboard::open(SimConfig::default(), store, fixed_now()).expect("reopen");
    assert_eq!(dash.selected_segment_id(), "seg-002");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unknown_stored_value_falls_back_to_first_id() {
    let store = DashStore::in_memory().expect("in-memory store");
    store.migrate().expect("migrate");
    store
        .save_selected_segment("seg-deleted-long-ago")
        .expect("seed bogus value");

    let ids = vec!["seg-001".to_string(), "seg-002".to_string()];
    let selected = store.load_selected_segment(&ids).expect("load");
    assert_eq!(selected, "seg-001");
}
