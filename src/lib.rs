#![doc(test(attr(deny(warnings))))]

//! Month Manager keeps a local record of income and expense entries, scopes
//! them by calendar month, and derives the totals shown in a monthly summary.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Month Manager tracing initialized.");
    });
}
