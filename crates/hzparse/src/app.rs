//! Directory scan
//!
//! Every file in the directory whose name does not begin with
//! `.` is decoded as a bulletin file, in name order. A file which
//! cannot be decoded is reported and skipped.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::{error, info};

use hazards::{BulletinFile, EventQuery};

use crate::cli::Args;

/// Run the application
///
/// Decodes the `--dir` given in `args` and writes the report to
/// `out`. Fails only if the directory cannot be listed or the
/// report cannot be written.
pub fn run<W>(args: &Args, out: &mut W) -> Result<(), anyhow::Error>
where
    W: Write,
{
    let names = list_bulletins(&args.dir)?;
    info!(
        "decoding {} bulletin file(s) in \"{}\"",
        names.len(),
        args.dir.display()
    );

    let mut files = Vec::with_capacity(names.len());
    for name in names {
        match BulletinFile::from_path(args.dir.join(&name)) {
            Ok(file) => {
                if !args.quiet {
                    writeln!(out, "File:  {} ({} bulletins)", name, file.len())?;
                }
                files.push(file);
            }
            Err(err) => error!("{}: {}", name, err),
        }
    }

    if args.wants_events() {
        let mut query = EventQuery::new();
        query.with_active_only(args.active);
        if let Some(n) = args.last {
            query.with_most_recent(n);
        }
        if let Some(now) = args.at {
            query.at(now);
        }

        for event in query.run(&files) {
            writeln!(
                out,
                "\nEvent:  {} ({} bulletins)\n{}",
                event.identity(),
                event.len(),
                event
            )?;
        }
    }

    Ok(())
}

// Names of candidate bulletin files in `dir`, sorted
fn list_bulletins(dir: &Path) -> Result<Vec<String>, anyhow::Error> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Unable to read --dir \"{}\"", dir.display()))?;

    let mut names = vec![];
    for entry in entries {
        let entry = entry.with_context(|| format!("Unable to read --dir \"{}\"", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}
