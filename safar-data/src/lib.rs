//! Data access for the Safar route safety engine.
//!
//! Responsibilities:
//! - Load the crime incident dataset from CSV into a
//!   [`safar_core::IncidentStore`].
//! - Fetch candidate routes from an HTTP routing service.
//! - Open files through capability-scoped UTF-8 paths.
//!
//! Boundaries:
//! - Do not encode scoring rules (live in `safar-scorer`).
//! - Keep blocking I/O off async executors; the routing client is async.
//!
//! Invariants:
//! - Every loaded incident has a valid coordinate and finite features.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod fs;
mod incidents;
pub mod routing;

pub use fs::{file_is_file, open_utf8_file};
pub use incidents::{CsvLayout, DataLoadError, DatasetConfig, load_incidents, read_incidents};
