//! Session commands: start, stop, reset and quick-add.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tenk_core::format_seconds;
use tenk_store::Store;

use super::util::update;

pub fn start<W: Write>(writer: &mut W, store: &Store, now: DateTime<Utc>) -> Result<()> {
    update(store, |tracker| {
        if tracker.start(now) {
            writeln!(
                writer,
                "Started session for {}",
                tracker.current_category()
            )?;
        } else if let Some(category) = tracker.session().bound_category() {
            writeln!(
                writer,
                "Session already running for {category} ({})",
                format_seconds(tracker.session().elapsed_seconds(now))
            )?;
        }
        Ok(())
    })
}

pub fn stop<W: Write>(writer: &mut W, store: &Store, now: DateTime<Utc>) -> Result<()> {
    update(store, |tracker| {
        match tracker.stop(now) {
            Some(commit) => {
                writeln!(
                    writer,
                    "Stopped: +{} to {} (total {})",
                    format_seconds(commit.seconds),
                    commit.category,
                    format_seconds(tracker.ledger().total_of(commit.category.as_str()))
                )?;
            }
            None => writeln!(writer, "No session running")?,
        }
        Ok(())
    })
}

/// Erases all totals. Refuses unless `confirmed`.
pub fn reset<W: Write>(writer: &mut W, store: &Store, confirmed: bool) -> Result<()> {
    if !confirmed {
        anyhow::bail!("refusing to reset without --yes; this erases all recorded time");
    }
    update(store, |tracker| {
        tracker.reset();
        Ok(())
    })?;
    writeln!(writer, "All totals reset")?;
    Ok(())
}

pub fn add_minutes<W: Write>(writer: &mut W, store: &Store, minutes: f64) -> Result<()> {
    update(store, |tracker| {
        let added = tracker.add_minutes(minutes);
        let category = tracker.current_category();
        writeln!(
            writer,
            "Added {} to {category} (total {})",
            format_seconds(added),
            format_seconds(tracker.ledger().total_of(category.as_str()))
        )?;
        Ok(())
    })
}
