#![doc(test(attr(deny(warnings))))]

//! Expense Core keeps a personal expense log on the device and derives the
//! filtered lists, date groupings, and spending summaries that every screen
//! of the app reads from.

pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::core::errors::{CoreError, StoreError};
pub use crate::core::session::ExpenseSession;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
