//! Command-line interface for `civic`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{CliOverrides, Config};
use crate::logging;

/// `civic` - Report and track civic issues.
#[derive(Parser, Debug)]
#[command(name = "civic")]
#[command(
    author,
    version,
    about = "Report, triage and verify civic issues",
    long_about = None,
    after_help = "Reads a JSONL dataset (or the built-in sample issues). Changes are printed, never written back."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSONL dataset to load instead of the sample issues
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Config file (default: .civic/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List issues
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show issue details
    Show(ShowArgs),

    /// Dashboard statistics
    Stats,

    /// List open high and critical priority issues
    Urgent,

    /// List everyone with assigned work
    Assignees,

    /// Report a new issue
    Report(ReportArgs),

    /// Move an issue to another status
    Transition(TransitionArgs),

    /// Dispute a resolution
    Dispute(DisputeArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by status (open, in-progress, resolved, closed, all)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Filter by category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by priority
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// Filter by assignee name, or `unassigned`
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Search title, description and address
    #[arg(long)]
    pub search: Option<String>,

    /// Sort order: newest, updated, priority
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue ID
    pub id: String,

    /// Role whose available actions are listed
    #[arg(long, default_value = "citizen")]
    pub role: String,
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Short summary of the problem
    #[arg(long, default_value = "")]
    pub title: String,

    /// What is wrong and why it matters
    #[arg(long, default_value = "")]
    pub description: String,

    /// infrastructure, sanitation, safety, environment or transportation
    #[arg(long, default_value = "")]
    pub category: String,

    /// low, medium (default), high or critical
    #[arg(long)]
    pub priority: Option<String>,

    /// Latitude of the picked location
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the picked location
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Street address (default: formatted coordinates)
    #[arg(long)]
    pub address: Option<String>,

    /// Reporter name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Reporter email
    #[arg(long, default_value = "")]
    pub email: String,

    /// Photo URL (repeatable, first 3 kept)
    #[arg(long = "image", value_name = "URL")]
    pub images: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TransitionArgs {
    /// Issue ID
    pub id: String,

    /// Target status
    pub status: String,

    /// Acting role: citizen, authority or admin
    #[arg(long)]
    pub role: String,

    /// Verification comment (citizen closing an issue)
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Args, Debug)]
pub struct DisputeArgs {
    /// Issue ID
    pub id: String,

    /// Why the fix is not accepted
    #[arg(long)]
    pub comment: Option<String>,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let Some(command) = cli.command else {
        println!("civic - civic issue tracker. Use --help for usage.");
        return Ok(());
    };

    let name = command.name();
    if let Commands::Version = command {
        commands::version::execute(cli.json)?;
    } else {
        let overrides = CliOverrides {
            config: cli.config,
            data: cli.data,
            id_prefix: None,
        };
        let config = Config::load(&overrides)?;
        let mut ctx = commands::Context::load(config, cli.json)?;
        dispatch(command, &mut ctx)?;
    }

    tracing::info!(command = name, "done");
    Ok(())
}

fn dispatch(command: Commands, ctx: &mut commands::Context) -> crate::Result<()> {
    match command {
        Commands::List(args) => commands::list::execute(&args, ctx),
        Commands::Show(args) => commands::show::execute(&args, ctx),
        Commands::Stats => commands::stats::execute(ctx),
        Commands::Urgent => commands::urgent::execute(ctx),
        Commands::Assignees => commands::assignees::execute(ctx),
        Commands::Report(args) => commands::report::execute(args, ctx),
        Commands::Transition(args) => commands::transition::execute(&args, ctx),
        Commands::Dispute(args) => commands::dispute::execute(&args, ctx),
        Commands::Version => commands::version::execute(ctx.json),
    }
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Stats => "stats",
            Self::Urgent => "urgent",
            Self::Assignees => "assignees",
            Self::Report(_) => "report",
            Self::Transition(_) => "transition",
            Self::Dispute(_) => "dispute",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "civic", "list", "--status", "open", "--sort", "priority", "--limit", "2", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.status.as_deref(), Some("open"));
                assert_eq!(args.sort.as_deref(), Some("priority"));
                assert_eq!(args.limit, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "civic", "report", "--title", "Leak", "--lat", "40.7", "--lng", "-73.9", "--image",
            "a.jpg", "--image", "b.jpg",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Report(args)) => {
                assert_eq!(args.lng, Some(-73.9));
                assert_eq!(args.images, vec!["a.jpg", "b.jpg"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_transition_requires_role() {
        assert!(Cli::try_parse_from(["civic", "transition", "1", "resolved"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["civic", "stats", "-vv", "--data", "x.jsonl"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data, Some(PathBuf::from("x.jsonl")));
    }
}
