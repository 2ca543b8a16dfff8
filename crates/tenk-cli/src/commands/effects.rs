//! Effects commands for the decorative background animation flags.

use std::io::Write;

use anyhow::Result;
use tenk_store::Store;

use super::util::update;

pub fn set_enabled<W: Write>(writer: &mut W, store: &Store, enabled: bool) -> Result<()> {
    update(store, |tracker| {
        tracker.set_effects_enabled(enabled);
        Ok(())
    })?;
    writeln!(writer, "Effects {}", if enabled { "on" } else { "off" })?;
    Ok(())
}

pub fn toggle_pause<W: Write>(writer: &mut W, store: &Store) -> Result<()> {
    let paused = update(store, |tracker| {
        tracker.toggle_animation_paused().map_err(Into::into)
    })?;
    writeln!(
        writer,
        "Animation {}",
        if paused { "paused" } else { "resumed" }
    )?;
    Ok(())
}
