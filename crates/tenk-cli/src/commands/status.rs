//! Status command: totals, running session and goal progress.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tenk_core::{Preferences, TrackerView, format_seconds};
use tenk_store::Store;

use super::util::load_tracker;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, store: &Store, config: &Config, now: DateTime<Utc>) -> Result<()> {
    let tracker = load_tracker(store)?;
    let view = tracker.view(now, config.goal_seconds());
    render(writer, &view, config.goal_hours)?;
    render_preferences(writer, tracker.preferences())?;
    Ok(())
}

/// Writes the timer block shown by `status` and `watch`.
pub fn render<W: Write>(writer: &mut W, view: &TrackerView, goal_hours: u64) -> Result<()> {
    writeln!(writer, "Category: {}", view.current_category)?;
    writeln!(writer, "Total:    {}", format_seconds(view.current_total))?;
    match &view.session_category {
        Some(category) => writeln!(
            writer,
            "Session:  {} (running for {category})",
            format_seconds(view.session_seconds)
        )?,
        None => writeln!(writer, "Session:  idle")?,
    }
    writeln!(
        writer,
        "Progress: {:.2}% of {goal_hours}h",
        view.progress_percent
    )?;

    writeln!(writer, "Categories:")?;
    for (name, secs) in &view.totals {
        let marker = if *name == view.current_category { '*' } else { '-' };
        writeln!(writer, "{marker} {name}: {}", format_seconds(*secs))?;
    }
    Ok(())
}

fn render_preferences<W: Write>(writer: &mut W, prefs: &Preferences) -> Result<()> {
    if prefs.background_data_url().is_some() {
        writeln!(
            writer,
            "Background: image ({}, {}, overlay {})",
            prefs.background_fit(),
            prefs.background_attachment(),
            prefs.overlay_alpha()
        )?;
    } else {
        writeln!(writer, "Background: none")?;
    }
    let effects = match (prefs.effects_enabled(), prefs.animation_paused()) {
        (false, _) => "off",
        (true, false) => "on",
        (true, true) => "on (paused)",
    };
    writeln!(writer, "Effects:    {effects}")?;
    Ok(())
}
