#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn gg() -> Command {
    cargo_bin_cmd!("gymgate")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_gymgate.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    // WAL sidecar files from a previous run
    fs::remove_file(format!("{}-wal", db_path)).ok();
    fs::remove_file(format!("{}-shm", db_path)).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Shorthand for building timestamps in tests.
pub fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .expect("valid date")
        .and_hms_opt(h, mi, s)
        .expect("valid time")
}

pub fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, mo, d).expect("valid date")
}

/// Initialize DB schema via the CLI (creates tables)
pub fn init_db(db_path: &str) {
    gg().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and register a member, the common starting point
pub fn init_db_with_member(db_path: &str, gym: &str, member: &str, user: &str) {
    init_db(db_path);

    gg().args([
        "--db", db_path, "--test", "member", gym, "--add", "--member", member, "--user", user,
        "--name", "Test Member",
    ])
    .assert()
    .success();
}

/// Open the DB directly via the library for setup/assertions
pub fn open_pool(db_path: &str) -> gymgate::db::pool::DbPool {
    let pool = gymgate::db::pool::DbPool::new(db_path).expect("open db");
    gymgate::db::initialize::init_db(&pool.conn).expect("init db");
    pool
}

/// Register a member directly via the library DB API
pub fn seed_member(pool: &gymgate::db::pool::DbPool, gym: &str, member: &str, user: &str) {
    gymgate::db::members::insert_member(
        &pool.conn,
        gym,
        member,
        user,
        "Test Member",
        "2025-01-01T00:00:00+00:00",
    )
    .expect("seed member");
}
