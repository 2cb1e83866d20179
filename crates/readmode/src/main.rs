// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod client;
mod logging;

use clap::Parser;

fn main() {
    let args = cli::Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // logging should never block normal usage
        eprintln!("readmode: failed to init logging: {e}");
    }

    if let Err(e) = client::run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
