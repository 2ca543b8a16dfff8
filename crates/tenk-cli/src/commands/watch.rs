//! Watch command: periodic, read-only status refresh.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tenk_store::Store;

use super::status;
use super::util::load_tracker;
use crate::Config;

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Redraws the status every `refresh_interval_ms` until `ticks` redraws
/// have happened, or forever when `ticks` is `None`.
///
/// State is reloaded on each tick, so sessions started or stopped from
/// another shell show up. Nothing is ever written back.
pub fn run<W: Write>(
    writer: &mut W,
    store: &Store,
    config: &Config,
    ticks: Option<u64>,
    clear: bool,
) -> Result<()> {
    let interval = Duration::from_millis(config.refresh_interval_ms.max(1));
    let mut drawn = 0u64;
    loop {
        let tracker = load_tracker(store)?;
        let view = tracker.view(Utc::now(), config.goal_seconds());
        if clear {
            write!(writer, "{CLEAR_SCREEN}")?;
        }
        status::render(writer, &view, config.goal_hours)?;
        writer.flush()?;

        drawn += 1;
        if ticks.is_some_and(|limit| drawn >= limit) {
            return Ok(());
        }
        if !clear {
            writeln!(writer)?;
        }
        thread::sleep(interval);
    }
}
