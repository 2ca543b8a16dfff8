//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tenk_core::{BackgroundAttachment, BackgroundFit};

/// Ten-thousand-hour practice tracker.
///
/// Accumulates practice time per category toward a 10,000-hour goal and
/// keeps the state in a local database.
#[derive(Debug, Parser)]
#[command(name = "tenk", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show totals, the running session and goal progress.
    Status,

    /// Start a session for the current category.
    Start,

    /// Stop the running session and credit the category it started with.
    Stop,

    /// Erase all totals and discard any running session.
    Reset {
        /// Confirm the reset. Nothing is erased without it.
        #[arg(long)]
        yes: bool,
    },

    /// Add minutes to the current category without running a session.
    Add {
        /// Minutes to add. Fractions are floored to whole seconds.
        #[arg(allow_negative_numbers = true)]
        minutes: f64,
    },

    /// Manage practice categories.
    #[command(subcommand)]
    Category(CategoryAction),

    /// Write the full state to a JSON file.
    Export {
        /// Output file, or `-` for stdout. Defaults to `tenk-timer-data.json`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the state with a previously exported file.
    Import {
        /// File produced by `tenk export`.
        path: PathBuf,
    },

    /// Configure the background image.
    #[command(subcommand)]
    Background(BackgroundAction),

    /// Toggle the decorative background effects.
    #[command(subcommand)]
    Effects(EffectsAction),

    /// Redraw the status periodically until interrupted.
    Watch {
        /// Stop after this many redraws.
        #[arg(long)]
        ticks: Option<u64>,
    },
}

/// Category subcommands.
#[derive(Debug, Subcommand)]
pub enum CategoryAction {
    /// List categories and their totals.
    List,
    /// Add a category and make it current.
    Add {
        /// Category name.
        name: String,
    },
    /// Make an existing category current.
    Select {
        /// Category name.
        name: String,
    },
}

/// Background subcommands.
#[derive(Debug, Subcommand)]
pub enum BackgroundAction {
    /// Show the current background settings.
    Show,
    /// Embed an image file as the background.
    Set {
        /// Image file (png, jpg, gif, webp, svg or bmp).
        image: PathBuf,
    },
    /// Remove the background image.
    Clear,
    /// How the image is scaled: cover, contain or stretch.
    Fit { fit: BackgroundFit },
    /// Whether the image scrolls: fixed or scroll.
    Attachment { attachment: BackgroundAttachment },
    /// Overlay strength between 0 and 1.
    Overlay { alpha: f32 },
}

/// Effects subcommands.
#[derive(Debug, Subcommand)]
pub enum EffectsAction {
    /// Enable the effects.
    On,
    /// Disable the effects.
    Off,
    /// Pause or resume the animation.
    Pause,
}
