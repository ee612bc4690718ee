//! I/O module
//!
//! Handles snapshot persistence and CSV output.
//!
//! # Components
//!
//! - `snapshot` - `SnapshotStore` trait with JSON file and in-memory stores
//! - `csv_format` - CSV writers for accounts, journal lines and the summary

pub mod csv_format;
pub mod snapshot;

pub use csv_format::{write_accounts_csv, write_ledger_csv, write_summary_csv};
pub use snapshot::{JsonFileStore, MemoryStore, SnapshotStore};
