//! Category commands for listing, adding and switching categories.

use std::io::Write;

use anyhow::Result;
use tenk_core::format_seconds;
use tenk_store::Store;

use super::util::{load_tracker, update};

pub fn list<W: Write>(writer: &mut W, store: &Store) -> Result<()> {
    let tracker = load_tracker(store)?;
    let current = tracker.current_category();
    for (name, secs) in tracker.ledger().iter() {
        let marker = if name == current { '*' } else { ' ' };
        writeln!(
            writer,
            "{marker} {:<20} {}",
            name.as_str(),
            format_seconds(secs)
        )?;
    }
    Ok(())
}

pub fn add<W: Write>(writer: &mut W, store: &Store, name: &str) -> Result<()> {
    update(store, |tracker| {
        let added = tracker.add_category(name)?;
        writeln!(writer, "Added category {added} (now current)")?;
        Ok(())
    })
}

pub fn select<W: Write>(writer: &mut W, store: &Store, name: &str) -> Result<()> {
    update(store, |tracker| {
        let selected = tracker.select_category(name)?.clone();
        writeln!(writer, "Current category: {selected}")?;
        match tracker.session().bound_category() {
            Some(bound) if *bound != selected => {
                writeln!(writer, "Running session still credits {bound}")?;
            }
            _ => {}
        }
        Ok(())
    })
}
