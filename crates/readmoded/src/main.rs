// Author: Dustin Pilgrim
// License: MIT

mod config;
mod daemon;
mod logging;

use std::path::PathBuf;
use clap::Parser;

use daemon::store::SettingsStore;

#[derive(Debug, Parser)]
#[command(name = "readmoded", version, about = "Read Mode daemon — screen tint overlay settings")]
struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/readmode/readmoded.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Override config file path (default: $XDG_CONFIG_HOME/readmode/readmode.rune)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override settings store path (takes precedence over readmode.store_path)
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| daemon::default_log_path("readmoded.log"));

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // logging is not up yet; stderr is all we have
        eprintln!("readmoded: failed to init logging: {e}");
        std::process::exit(1);
    }

    eventline::info!("readmoded starting");
    eventline::debug!("verbose={}", args.verbose);
    eventline::debug!("log_path={}", log_path.display());

    let mut cfg = match config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eventline::warn!("failed to load config (using defaults): {e}");
            config::ReadModeConfig::default()
        }
    };

    if let Some(store) = args.store {
        cfg.store_path = store;
    }

    let store = match SettingsStore::open(&cfg.store_path) {
        Ok(s) => s,
        Err(e) => {
            eventline::error!("cannot open settings store: {e}");
            if !args.verbose {
                eprintln!("readmoded: cannot open settings store {}: {e}", cfg.store_path.display());
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = daemon::run(cfg, store, args.verbose) {
        eventline::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
