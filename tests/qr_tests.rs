//! QR credential manager and scan pipeline tests.

use chrono::Duration;
use gymgate::errors::AppError;
use gymgate::models::source::CheckInSource;
use gymgate::qr::scan::handle_scan;
use gymgate::qr::{
    QrPayload, get_or_create_config, payload_for, regenerate_secret, set_enabled,
};

mod common;
use common::{dt, open_pool, seed_member, setup_test_db};

fn stale() -> Duration {
    Duration::hours(3)
}

#[test]
fn config_is_created_lazily_and_reused() {
    let db_path = setup_test_db("qr_lazy_create");
    let pool = open_pool(&db_path);

    let first = get_or_create_config(&pool.conn, "g1").expect("create");
    assert!(first.is_enabled);
    assert_eq!(first.secret.len(), 64);
    assert!(first.secret.chars().all(|c| c.is_ascii_hexdigit()));

    let second = get_or_create_config(&pool.conn, "g1").expect("reuse");
    assert_eq!(second.secret, first.secret);
    assert_eq!(second.last_rotated_at, first.last_rotated_at);
}

#[test]
fn distinct_gyms_get_distinct_secrets() {
    let db_path = setup_test_db("qr_distinct_gyms");
    let pool = open_pool(&db_path);

    let a = get_or_create_config(&pool.conn, "g1").expect("g1");
    let b = get_or_create_config(&pool.conn, "g2").expect("g2");
    assert_ne!(a.secret, b.secret);
}

#[test]
fn payload_round_trips_as_camel_case_json() {
    let db_path = setup_test_db("qr_payload_json");
    let pool = open_pool(&db_path);

    let cfg = get_or_create_config(&pool.conn, "g1").expect("create");
    let raw = payload_for(&cfg).expect("payload");

    assert!(raw.contains("\"gymId\""));
    assert!(raw.contains("\"secret\""));

    let parsed: QrPayload = serde_json::from_str(&raw).expect("parse");
    assert_eq!(parsed.gym_id, "g1");
    assert_eq!(parsed.secret, cfg.secret);
}

#[test]
fn scan_checks_the_member_in() {
    let db_path = setup_test_db("qr_scan_happy");
    let pool = open_pool(&db_path);
    seed_member(&pool, "g1", "m1", "u1");

    let cfg = get_or_create_config(&pool.conn, "g1").expect("create");
    let raw = payload_for(&cfg).expect("payload");

    let session = handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect("scan");
    assert_eq!(session.gym_id, "g1");
    assert_eq!(session.member_id, "m1");
    assert_eq!(session.source, CheckInSource::QrScan);
    assert!(session.is_open());
}

#[test]
fn immediate_second_scan_is_already_in_gym() {
    let db_path = setup_test_db("qr_scan_double");
    let pool = open_pool(&db_path);
    seed_member(&pool, "g1", "m1", "u1");

    let cfg = get_or_create_config(&pool.conn, "g1").expect("create");
    let raw = payload_for(&cfg).expect("payload");

    handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 0, 0), stale()).expect("first scan");

    let err = handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 0, 30), stale())
        .expect_err("second scan must fail");
    assert!(matches!(err, AppError::AlreadyInGym));
}

#[test]
fn rotation_invalidates_previously_issued_payloads() {
    let db_path = setup_test_db("qr_rotate_invalidates");
    let pool = open_pool(&db_path);
    seed_member(&pool, "g1", "m1", "u1");

    let before = get_or_create_config(&pool.conn, "g1").expect("create");
    let old_payload = payload_for(&before).expect("payload");

    let after = regenerate_secret(&pool.conn, "g1").expect("rotate");
    assert_ne!(after.secret, before.secret);

    let err = handle_scan(&pool.conn, &old_payload, "u1", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect_err("old payload must be rejected");
    assert!(matches!(err, AppError::InvalidQr));
    assert_eq!(err.code(), Some("INVALID_QR"));

    // The freshly displayed payload works.
    let new_payload = payload_for(&after).expect("payload");
    handle_scan(&pool.conn, &new_payload, "u1", dt(2025, 9, 1, 9, 1, 0), stale())
        .expect("new payload accepted");
}

#[test]
fn disabled_gym_rejects_scans_with_the_correct_secret() {
    let db_path = setup_test_db("qr_disabled");
    let pool = open_pool(&db_path);
    seed_member(&pool, "g1", "m1", "u1");

    let cfg = get_or_create_config(&pool.conn, "g1").expect("create");
    let raw = payload_for(&cfg).expect("payload");

    set_enabled(&pool.conn, "g1", false).expect("disable");

    let err = handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect_err("disabled gym must reject");
    assert!(matches!(err, AppError::InvalidQr));

    // Re-enabling restores scans without touching the secret.
    set_enabled(&pool.conn, "g1", true).expect("enable");
    handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 5, 0), stale()).expect("scan");
}

#[test]
fn malformed_and_mismatched_payloads_are_indistinguishable() {
    let db_path = setup_test_db("qr_invalid_variants");
    let pool = open_pool(&db_path);
    seed_member(&pool, "g1", "m1", "u1");

    let cfg = get_or_create_config(&pool.conn, "g1").expect("create");

    // Not JSON at all
    let err = handle_scan(&pool.conn, "not-json", "u1", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect_err("garbage payload");
    assert!(matches!(err, AppError::InvalidQr));

    // Unknown gym
    let raw = serde_json::to_string(&QrPayload {
        gym_id: "nope".into(),
        secret: cfg.secret.clone(),
    })
    .expect("json");
    let err = handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect_err("unknown gym");
    assert!(matches!(err, AppError::InvalidQr));

    // Same-length secret with one byte off
    let mut wrong = cfg.secret.clone().into_bytes();
    wrong[0] = if wrong[0] == b'0' { b'1' } else { b'0' };
    let raw = serde_json::to_string(&QrPayload {
        gym_id: "g1".into(),
        secret: String::from_utf8(wrong).expect("utf8"),
    })
    .expect("json");
    let err = handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect_err("wrong secret");
    assert!(matches!(err, AppError::InvalidQr));

    // Truncated secret (length mismatch path)
    let raw = serde_json::to_string(&QrPayload {
        gym_id: "g1".into(),
        secret: cfg.secret[..10].to_string(),
    })
    .expect("json");
    let err = handle_scan(&pool.conn, &raw, "u1", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect_err("short secret");
    assert!(matches!(err, AppError::InvalidQr));
}

#[test]
fn scan_by_non_member_is_member_not_found() {
    let db_path = setup_test_db("qr_non_member");
    let pool = open_pool(&db_path);

    let cfg = get_or_create_config(&pool.conn, "g1").expect("create");
    let raw = payload_for(&cfg).expect("payload");

    let err = handle_scan(&pool.conn, &raw, "stranger", dt(2025, 9, 1, 9, 0, 0), stale())
        .expect_err("no profile at this gym");
    assert!(matches!(err, AppError::MemberNotFound));
    assert_eq!(err.code(), Some("MEMBER_NOT_FOUND"));
}

#[test]
fn toggling_does_not_rotate_the_secret() {
    let db_path = setup_test_db("qr_toggle_keeps_secret");
    let pool = open_pool(&db_path);

    let before = get_or_create_config(&pool.conn, "g1").expect("create");
    set_enabled(&pool.conn, "g1", false).expect("disable");
    let after = set_enabled(&pool.conn, "g1", true).expect("enable");

    assert_eq!(after.secret, before.secret);
}
