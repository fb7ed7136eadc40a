use std::fmt::Display;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{error::ErrorKind, CommandFactory, Parser};

const USAGE_SHORT: &str = r#"
This program decodes a directory of NWS hazard bulletin files and prints the number of products in each one.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program decodes a directory of NWS hazard bulletin files and prints the number of products in each one.

Bulletin files must be named for the hour in which they were assembled, as YYYYMMDDHH, like

    2015062121.severe

Files whose names begin with "." are ignored.

With --events, segments which describe the same hazard are correlated into events, and every event is printed. Use --active to print only events which are still in effect and --last to consider only the most recent files:

    hzparse --dir /var/spool/hazards --active --last 6
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print no file summaries and no log messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory of bulletin files
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Correlate bulletins into events and print them
    #[arg(short, long)]
    pub events: bool,

    /// Print only events which are still in effect
    ///
    /// Implies --events.
    #[arg(short, long)]
    pub active: bool,

    /// Correlate only the N most recent files
    ///
    /// Files are ordered by the date in their name. Implies --events.
    #[arg(short, long, value_name = "N")]
    pub last: Option<usize>,

    /// Judge --active events at TIME instead of now
    ///
    /// TIME is in RFC 3339 format, like 2015-06-21T21:30:00Z.
    #[arg(long, value_name = "TIME", requires = "active")]
    pub at: Option<DateTime<Utc>>,
}

impl Args {
    /// Return true if events should be correlated and printed
    pub fn wants_events(&self) -> bool {
        self.events || self.active || self.last.is_some()
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Io, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}
