//! Portable export/import of the tracker state.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::snapshot::{self, Snapshot, StoredState};

/// Suggested file name for exports.
pub const EXPORT_FILE_NAME: &str = "tenk-timer-data.json";

/// Transfer errors.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The imported bytes are not a well-formed snapshot.
    #[error("invalid snapshot format: {0}")]
    Format(#[source] serde_json::Error),
    /// The snapshot could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedState<'a> {
    #[serde(flatten)]
    state: StoredState<'a>,
    exported_at: String,
}

/// Serializes a snapshot for download, stamped with `exported_at`.
pub fn export_snapshot(
    snapshot: &Snapshot,
    exported_at: DateTime<Utc>,
) -> Result<Vec<u8>, TransferError> {
    let exported = ExportedState {
        state: StoredState::from(snapshot),
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    serde_json::to_vec_pretty(&exported).map_err(TransferError::Serialize)
}

/// Parses an exported file.
///
/// Applies the same legacy migration as loading from storage. On error the
/// caller's state is untouched, since nothing is returned to apply.
pub fn import_snapshot(bytes: &[u8]) -> Result<Snapshot, TransferError> {
    let snapshot = snapshot::decode(bytes).map_err(TransferError::Format)?;
    tracing::debug!(
        categories = snapshot.ledger().len(),
        total_seconds = snapshot.legacy_total(),
        "parsed imported snapshot"
    );
    Ok(snapshot)
}
