//! Shared utilities for CLI commands.

use anyhow::{Context, Result};
use tenk_core::Tracker;
use tenk_store::Store;

/// Loads the tracker, falling back to a fresh one when nothing is stored.
pub fn load_tracker(store: &Store) -> Result<Tracker> {
    let tracker = store
        .load()
        .context("failed to load state")?
        .map_or_else(Tracker::new, Tracker::from_snapshot);
    Ok(tracker)
}

/// Runs one mutation against the stored tracker and writes it back.
///
/// If `f` fails nothing is saved, so the stored state stays as it was.
pub fn update<T>(store: &Store, f: impl FnOnce(&mut Tracker) -> Result<T>) -> Result<T> {
    let mut tracker = load_tracker(store)?;
    let out = f(&mut tracker)?;
    store
        .save(&tracker.snapshot())
        .context("failed to save state")?;
    Ok(out)
}
