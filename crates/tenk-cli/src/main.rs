use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tenk_cli::commands::{background, category, effects, session, status, transfer, watch};
use tenk_cli::{BackgroundAction, CategoryAction, Cli, Commands, Config, EffectsAction};

/// Load config and open the state store, ensuring the parent directory exists.
fn open_store(config_path: Option<&Path>) -> Result<(tenk_store::Store, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let store = tenk_store::Store::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok((store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (store, config) = open_store(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();
    let now = Utc::now();

    match command {
        Commands::Status => status::run(&mut stdout, &store, &config, now)?,
        Commands::Start => session::start(&mut stdout, &store, now)?,
        Commands::Stop => session::stop(&mut stdout, &store, now)?,
        Commands::Reset { yes } => session::reset(&mut stdout, &store, *yes)?,
        Commands::Add { minutes } => session::add_minutes(&mut stdout, &store, *minutes)?,
        Commands::Category(action) => match action {
            CategoryAction::List => category::list(&mut stdout, &store)?,
            CategoryAction::Add { name } => category::add(&mut stdout, &store, name)?,
            CategoryAction::Select { name } => category::select(&mut stdout, &store, name)?,
        },
        Commands::Export { output } => {
            transfer::export(&mut stdout, &store, output.as_deref(), now)?;
        }
        Commands::Import { path } => transfer::import(&mut stdout, &store, path)?,
        Commands::Background(action) => match action {
            BackgroundAction::Show => background::show(&mut stdout, &store)?,
            BackgroundAction::Set { image } => background::set(&mut stdout, &store, image)?,
            BackgroundAction::Clear => background::clear(&mut stdout, &store)?,
            BackgroundAction::Fit { fit } => background::fit(&mut stdout, &store, *fit)?,
            BackgroundAction::Attachment { attachment } => {
                background::attachment(&mut stdout, &store, *attachment)?;
            }
            BackgroundAction::Overlay { alpha } => {
                background::overlay(&mut stdout, &store, *alpha)?;
            }
        },
        Commands::Effects(action) => match action {
            EffectsAction::On => effects::set_enabled(&mut stdout, &store, true)?,
            EffectsAction::Off => effects::set_enabled(&mut stdout, &store, false)?,
            EffectsAction::Pause => effects::toggle_pause(&mut stdout, &store)?,
        },
        Commands::Watch { ticks } => {
            let clear = io::stdout().is_terminal();
            watch::run(&mut stdout, &store, &config, *ticks, clear)?;
        }
    }

    Ok(())
}
