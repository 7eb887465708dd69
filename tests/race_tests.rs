//! Concurrency tests: the single-open-session invariant must hold when
//! requests race, because it lives in the storage layer (a partial unique
//! index over the open-session subset), not in a read-check-write sequence.

use chrono::Duration;
use gymgate::core::engine;
use gymgate::db::pool::DbPool;
use gymgate::db::sessions::count_open_sessions;
use gymgate::errors::AppError;
use gymgate::models::source::CheckInSource;
use std::sync::{Arc, Barrier};
use std::thread;

mod common;
use common::{dt, open_pool, setup_test_db};

fn stale() -> Duration {
    Duration::hours(3)
}

#[test]
fn concurrent_check_ins_create_exactly_one_open_session() {
    let db_path = setup_test_db("race_checkin");
    drop(open_pool(&db_path)); // create schema, then release the connection

    let n = 8;
    let barrier = Arc::new(Barrier::new(n));

    let handles: Vec<_> = (0..n)
        .map(|_| {
            let path = db_path.clone();
            let gate = Arc::clone(&barrier);
            thread::spawn(move || {
                // Each request is an independent unit of work with its own
                // connection, as in production.
                let pool = DbPool::new(&path).expect("open db");
                gate.wait();
                engine::check_in(
                    &pool.conn,
                    "g1",
                    "m1",
                    CheckInSource::Button,
                    dt(2025, 9, 1, 9, 0, 0),
                    stale(),
                )
            })
        })
        .collect();

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.join().expect("thread") {
            Ok(_) => created += 1,
            Err(AppError::AlreadyInGym) => rejected += 1,
            Err(e) => panic!("unexpected outcome: {e}"),
        }
    }

    assert_eq!(created, 1, "exactly one request may win");
    assert_eq!(rejected, n - 1, "all others get ALREADY_IN_GYM");

    let pool = DbPool::new(&db_path).expect("open db");
    assert_eq!(count_open_sessions(&pool.conn, "g1", "m1").expect("count"), 1);
}

#[test]
fn concurrent_checkouts_close_once() {
    let db_path = setup_test_db("race_checkout");
    {
        let pool = open_pool(&db_path);
        engine::check_in(
            &pool.conn,
            "g1",
            "m1",
            CheckInSource::Button,
            dt(2025, 9, 1, 9, 0, 0),
            stale(),
        )
        .expect("check in");
    }

    let n = 4;
    let barrier = Arc::new(Barrier::new(n));

    let handles: Vec<_> = (0..n)
        .map(|_| {
            let path = db_path.clone();
            let gate = Arc::clone(&barrier);
            thread::spawn(move || {
                let pool = DbPool::new(&path).expect("open db");
                gate.wait();
                engine::check_out(&pool.conn, "g1", "m1", dt(2025, 9, 1, 10, 0, 0), stale())
            })
        })
        .collect();

    let mut closed = 0;
    let mut not_in_gym = 0;
    for handle in handles {
        match handle.join().expect("thread") {
            Ok(_) => closed += 1,
            Err(AppError::NotInGym) => not_in_gym += 1,
            Err(e) => panic!("unexpected outcome: {e}"),
        }
    }

    // The close is a conditional update keyed on the open session's id:
    // one checkout wins, the rest find nothing open.
    assert_eq!(closed, 1);
    assert_eq!(not_in_gym, n - 1);

    let pool = DbPool::new(&db_path).expect("open db");
    assert_eq!(count_open_sessions(&pool.conn, "g1", "m1").expect("count"), 0);
}

#[test]
fn racing_members_do_not_contend() {
    let db_path = setup_test_db("race_cross_member");
    drop(open_pool(&db_path));

    let n = 6;
    let barrier = Arc::new(Barrier::new(n));

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let path = db_path.clone();
            let gate = Arc::clone(&barrier);
            thread::spawn(move || {
                let pool = DbPool::new(&path).expect("open db");
                let member = format!("m{}", i);
                gate.wait();
                engine::check_in(
                    &pool.conn,
                    "g1",
                    &member,
                    CheckInSource::Button,
                    dt(2025, 9, 1, 9, 0, 0),
                    stale(),
                )
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread").expect("distinct members never collide");
    }

    let pool = DbPool::new(&db_path).expect("open db");
    for i in 0..n {
        let member = format!("m{}", i);
        assert_eq!(
            count_open_sessions(&pool.conn, "g1", &member).expect("count"),
            1
        );
    }
}
