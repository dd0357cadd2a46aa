//! Command-line interface definitions for the `keytips` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use keytips::{Chord, CommandId};
use logging::LogArgs;

/// Command-line interface for the `keytips` binary.
#[derive(Parser, Debug)]
#[command(
    name = "keytips",
    about = "Alt-key chord dispatch for spreadsheet commands",
    version
)]
pub struct Cli {
    /// Logging controls shared across keytips binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Directory holding the user keytips file (default: $KEYTIPS_HOME, then ~/.keytips).
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in keytips, then user keytips.
    List,
    /// List every command a keytip can run.
    #[command(name = "commands")]
    Vocabulary,
    /// Check the merged keytip set for conflicts.
    Validate,
    /// Bind a new user keytip.
    Add(AddArgs),
    /// Remove the user keytip bound to a chord.
    Remove(ChordArg),
    /// Check whether a chord could be bound.
    Check(ChordArg),
    /// Show the letters that may follow a partial chord.
    Next(NextArgs),
    /// Interactive session: `alt` activates, `esc` cancels, other lines are keystrokes.
    Run(RunArgs),
}

/// Arguments for `add`.
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Chord letters, e.g. `xb` or `X-B`.
    #[arg(value_name = "CHORD", value_parser = Chord::parse)]
    pub chord: Chord,

    /// Command id, e.g. `bold` or `pasteValues`.
    #[arg(value_name = "COMMAND", value_parser = parse_command)]
    pub command: CommandId,

    /// Display label.
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Display group (defaults to the chord's first letter).
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,
}

/// A single chord argument.
#[derive(Args, Debug, Clone)]
pub struct ChordArg {
    /// Chord letters, e.g. `hvv` or `H V V`.
    #[arg(value_name = "CHORD", value_parser = Chord::parse)]
    pub chord: Chord,
}

/// Arguments for `next`.
#[derive(Args, Debug, Clone)]
pub struct NextArgs {
    /// Letters typed so far; omit for an empty sequence.
    #[arg(value_name = "CHORD", value_parser = Chord::parse)]
    pub chord: Option<Chord>,
}

/// Arguments for `run`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Name of the sheet commands are applied to.
    #[arg(long, default_value = "Sheet1", value_name = "NAME")]
    pub sheet: String,

    /// Reject every command, to exercise failure reporting.
    #[arg(long)]
    pub read_only: bool,
}

/// Parse a command wire id.
fn parse_command(s: &str) -> keytips::Result<CommandId> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_global_store() {
        let cli = Cli::try_parse_from([
            "keytips", "add", "xb", "bold", "My Bold", "--group", "Fmt", "--store", "/tmp/kt",
        ])
        .expect("parse");
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/kt")));
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.chord, Chord::parse("XB").expect("chord"));
        assert_eq!(args.command, CommandId::Bold);
        assert_eq!(args.label, "My Bold");
        assert_eq!(args.group.as_deref(), Some("Fmt"));
    }

    #[test]
    fn rejects_bad_chord_and_command() {
        assert!(Cli::try_parse_from(["keytips", "check", "h1"]).is_err());
        assert!(Cli::try_parse_from(["keytips", "add", "xb", "frobnicate", "x"]).is_err());
    }

    #[test]
    fn next_chord_is_optional() {
        let cli = Cli::try_parse_from(["keytips", "next"]).expect("parse");
        assert!(matches!(cli.command, Commands::Next(NextArgs { chord: None })));
        let cli = Cli::try_parse_from(["keytips", "--debug", "commands"]).expect("parse");
        assert!(matches!(cli.command, Commands::Vocabulary));
        assert!(cli.log.debug);
    }
}
