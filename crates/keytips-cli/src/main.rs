#![warn(missing_docs)]

//! Entry point for the `keytips` binary.

mod actions;
mod cli;
mod error;
mod overlay;
mod paths;
mod session;
mod sheet;

use std::{
    io::{self, Write},
    process,
};

use clap::Parser;
use keytips::{DynamicStore, FileStore, Registry};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
    sheet::Sheet,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, open the store, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli {
        log,
        store,
        command,
    } = Cli::parse();
    let log_spec = log.spec();
    let env_filter = logging::env_filter_from_spec(&log_spec);
    registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    let dir = paths::resolve_store_dir(store.as_deref())?;
    info!(dir = %dir.display(), "keytips_store");
    let mut tips = DynamicStore::new(Registry::builtin(), FileStore::new(dir));
    tips.load();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::List => actions::list(&tips, &mut out),
        Commands::Vocabulary => actions::vocabulary(&mut out),
        Commands::Validate => actions::validate_all(&tips, &mut out),
        Commands::Add(args) => actions::add(&mut tips, args, &mut out),
        Commands::Remove(args) => actions::remove(&mut tips, &args.chord, &mut out),
        Commands::Check(args) => actions::check(&tips, &args.chord, &mut out),
        Commands::Next(args) => actions::next(&tips, &args, &mut out),
        Commands::Run(args) => {
            let sheet = Sheet::new(args.sheet, args.read_only);
            writeln!(
                out,
                "keytips: `alt` to activate, `esc` to cancel, `?` for hints, `quit` to exit"
            )?;
            let summary = session::run(&tips, &sheet, io::stdin().lock(), &mut out)?;
            writeln!(
                out,
                "{} chord(s) matched, {} command(s) applied to {}",
                summary.matched,
                summary.executed,
                sheet.name()
            )?;
            Ok(())
        }
    }
}
