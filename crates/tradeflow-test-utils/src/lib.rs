//!
//! Testing utilities for the Tradeflow platform
//!
//! Provides builders for domain snapshots and a ready-made tenant process
//! fixture so tests across the workspace exercise the same realistic trade
//! flow instead of each rolling their own.

#![forbid(unsafe_code)]

/// Builders for vehicle snapshots and finished-step records
pub mod builders;

/// A complete import-trade process fixture
pub mod fixtures;

pub use builders::{finished_step, ymd, VehicleSnapshotBuilder};
pub use fixtures::{import_trade_process, registry_with_import_trade, steps};
