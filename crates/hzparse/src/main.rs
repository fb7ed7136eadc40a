use std::io;

use clap::Parser;
use log::LevelFilter;

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match hzparse() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn hzparse() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(&args, &mut out)?;

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("hazards", log_filter)
            .filter_module("hzparse", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}
