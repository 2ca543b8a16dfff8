//! Core domain logic for the ten-thousand-hour tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Ledger: accumulated seconds per practice category
//! - Session: the start/stop state machine that binds a category at start
//! - Snapshot: the persisted payload and its legacy-schema migration
//! - Transfer: export/import of snapshots as portable files
//! - Tracker: the controller tying these together

pub mod format;
pub mod ledger;
pub mod preferences;
pub mod session;
pub mod snapshot;
pub mod tracker;
pub mod transfer;
mod types;

pub use format::{GOAL_SECONDS, format_hms, format_seconds, progress_percent};
pub use ledger::CategoryLedger;
pub use preferences::Preferences;
pub use session::{Commit, Session};
pub use snapshot::Snapshot;
pub use tracker::{Tracker, TrackerView};
pub use transfer::{EXPORT_FILE_NAME, TransferError, export_snapshot, import_snapshot};
pub use types::{BackgroundAttachment, BackgroundFit, CategoryName, OverlayAlpha, ValidationError};

/// Category every new or reset ledger starts with.
pub const DEFAULT_CATEGORY: &str = "General";
