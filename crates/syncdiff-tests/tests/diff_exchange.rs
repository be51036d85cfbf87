//! End-to-end diff exchange tests
//!
//! These tests drive the full path a sync session takes: decode a
//! (possibly gzip-compressed) request body, build the server-side snapshot
//! from a real directory tree, compute the reconciliation plan, and stream
//! it back with the terminating sentinel.

use syncdiff_config::{SyncPathConfig, SyncPathRegistry};
use syncdiff_engine::{compute_diff, AppliedRule, PlanDecision, SyncAction};
use syncdiff_snapshot::{Snapshot, SnapshotBuilder};
use syncdiff_tests::gzip_body;
use syncdiff_transport::{decode_diff_request, encode_plan, Handshake};
use syncdiff_types::{ConflictPolicy, DiffMode};
use tempfile::TempDir;

#[tokio::test]
async fn first_sync_uploads_fresh_client_tree() {
    // client snapshot has one file, server side is empty
    let body = br#"{
        "secureDiff": false,
        "firstSync": true,
        "snapshot": {"a.txt": [false, 100, 1000, 5, null]}
    }"#;

    let request = decode_diff_request(body, false).unwrap();
    let client = request.snapshot.clone().unwrap();
    let server = Snapshot::new();

    let options = request.diff_options(ConflictPolicy::MostRecentWins);
    let plan = compute_diff(&client, &server, &options);

    assert_eq!(plan.entries.len(), 1);
    let entry = plan.entry("a.txt").unwrap();
    assert_eq!(entry.decision, PlanDecision::Action(SyncAction::Upload));
    assert_eq!(entry.rule, AppliedRule::FirstSyncSeed);
}

#[tokio::test]
async fn identical_directories_need_no_action() {
    let body = br#"{
        "secureDiff": false,
        "firstSync": false,
        "snapshot": {"dir1": [true, 0, 1000, 1, null]}
    }"#;

    let request = decode_diff_request(body, false).unwrap();
    let client = request.snapshot.clone().unwrap();
    let server: Snapshot = serde_json::from_str(r#"{"dir1": [true, 0, 1000, 1, null]}"#).unwrap();

    let plan = compute_diff(&client, &server, &request.diff_options(ConflictPolicy::default()));
    assert!(plan.is_empty());
}

#[tokio::test]
async fn gzip_request_against_live_server_tree() {
    let temp = TempDir::new().unwrap();
    tokio::fs::write(temp.path().join("server-only.txt"), b"data")
        .await
        .unwrap();
    tokio::fs::write(temp.path().join(".DS_Store"), b"junk")
        .await
        .unwrap();

    let body = gzip_body(
        br#"{
            "secureDiff": true,
            "firstSync": false,
            "defaultFilters": [".DS_Store"],
            "snapshot": {}
        }"#,
    );
    let request = decode_diff_request(&body, true).unwrap();

    let server = SnapshotBuilder::new(request.filter_set().unwrap())
        .secure(request.secure_diff)
        .build(temp.path())
        .await
        .unwrap();

    let client = request.snapshot.clone().unwrap_or_default();
    let plan = compute_diff(&client, &server, &request.diff_options(ConflictPolicy::default()));

    // the filtered file is surfaced but not actioned; the real file downloads
    assert_eq!(plan.entries.len(), 1);
    let entry = plan.entry("server-only.txt").unwrap();
    assert_eq!(entry.decision, PlanDecision::Action(SyncAction::Download));
    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].path, ".DS_Store");
}

#[tokio::test]
async fn streamed_plan_terminates_with_sentinel() {
    let body = br#"{
        "secureDiff": false,
        "firstSync": true,
        "snapshot": {"a.txt": [false, 100, 1000, 5, null]}
    }"#;
    let request = decode_diff_request(body, false).unwrap();

    let plan = compute_diff(
        &request.snapshot.clone().unwrap(),
        &Snapshot::new(),
        &request.diff_options(ConflictPolicy::default()),
    );

    let encoded = encode_plan(&plan).unwrap();
    let text = String::from_utf8(encoded).unwrap();
    assert_eq!(text.lines().last(), Some("\"last\""));
}

#[test]
fn registered_sync_path_drives_diff_mode() {
    let registry = SyncPathRegistry::new();
    let mut config = SyncPathConfig::new("docs", "/home/me/docs", "/files/docs");
    config.diff_mode = DiffMode::Fast;
    config.conflict_mode = ConflictPolicy::PreferRemote;
    let registered = registry.register(config).unwrap();

    let stored = registry.get(registered.id.unwrap()).unwrap();
    assert_eq!(stored.diff_mode, DiffMode::Fast);
    assert_eq!(stored.conflict_mode, ConflictPolicy::PreferRemote);
}

#[test]
fn handshake_advertises_fixed_capabilities() {
    let handshake = Handshake::current();
    assert!(handshake.is_compatible());
    assert_eq!(handshake.checksum_algorithm, "sha512-256");
    assert_eq!(handshake.diff_modes.len(), 2);
}
