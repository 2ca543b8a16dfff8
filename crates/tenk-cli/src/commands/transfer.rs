//! Export and import of the full tracker state.
//!
//! Export writes the same payload the store keeps, pretty-printed and
//! stamped with `exportedAt`. Import replaces the stored state wholesale;
//! a file that fails to parse leaves the stored state untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tenk_core::{EXPORT_FILE_NAME, export_snapshot, format_seconds, import_snapshot};
use tenk_store::Store;

use super::util::load_tracker;

/// Where an export was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    File(PathBuf),
    Stdout,
}

/// Exports the stored state to `output`, or to the default file name.
///
/// An output of `-` writes the payload to `writer` instead of a file.
pub fn export<W: Write>(
    writer: &mut W,
    store: &Store,
    output: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<ExportTarget> {
    let tracker = load_tracker(store)?;
    let bytes = export_snapshot(&tracker.snapshot(), now).context("failed to export state")?;

    let path = output.unwrap_or_else(|| Path::new(EXPORT_FILE_NAME));
    if path == Path::new("-") {
        writer.write_all(&bytes)?;
        writeln!(writer)?;
        return Ok(ExportTarget::Stdout);
    }

    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported state");
    writeln!(writer, "Exported to {}", path.display())?;
    Ok(ExportTarget::File(path.to_path_buf()))
}

/// Replaces the stored state with the contents of an exported file.
pub fn import<W: Write>(writer: &mut W, store: &Store, path: &Path) -> Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot = import_snapshot(&bytes).context("import failed, stored state was not changed")?;

    store.save(&snapshot).context("failed to save imported state")?;
    tracing::info!(path = %path.display(), "imported state");

    writeln!(
        writer,
        "Imported {} categories (total {}), current category {}",
        snapshot.ledger().len(),
        format_seconds(snapshot.legacy_total()),
        snapshot.current_category()
    )?;
    Ok(())
}
