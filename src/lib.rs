//! Fintrack Core offers the ledger, persistence, and edit-session primitives
//! that power a personal finance tracker: recording income and expense
//! entries, deriving balance totals, and projecting filtered list views.

pub mod cli;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
