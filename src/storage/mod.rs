//! Storage layer for budget-pulse
//!
//! The backend owns all records. Locally we only keep small JSON files:
//! settings, the signed-in session, and an optional offline snapshot.
//! Every write is atomic.

pub mod file_io;
pub mod snapshot;

pub use file_io::{delete_file, load_json, load_json_required, save_json};
pub use snapshot::Snapshot;
