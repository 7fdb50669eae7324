#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset};
use expense_core::{
    core::time::FixedClock,
    domain::{Category, EntityId, Expense},
    storage::MemoryStore,
    ExpenseSession,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_root() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn at(raw: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(raw).expect("valid RFC3339 timestamp")
}

/// The instant every session test treats as now.
pub fn now() -> DateTime<FixedOffset> {
    at("2024-05-20T10:00:00+00:00")
}

pub fn clock() -> Box<FixedClock> {
    Box::new(FixedClock(now()))
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset")
}

pub fn expense(amount: f64, description: &str, category_id: &EntityId, date: &str) -> Expense {
    Expense::new(amount, description, category_id.clone(), at(date))
}

pub fn food() -> Category {
    Category::new("Food", "#EF4444")
}

pub fn travel() -> Category {
    Category::new("Travel", "#14B8A6")
}

/// Opens a session over a shared in-memory store the test can inspect.
pub fn memory_session() -> (ExpenseSession, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = ExpenseSession::open(Box::new(Arc::clone(&store)), clock());
    (session, store)
}
