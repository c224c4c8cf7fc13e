//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// File a security-assessment gap report (JSON on stdin) as a Jira ticket.
///
/// With no subcommand the report is validated, rendered to wiki markup,
/// created with jira-cli, and its description rewritten over REST. The new
/// ticket key is printed on stdout.
#[derive(Debug, Parser)]
#[command(name = "gapticket", version, about)]
pub struct Cli {
    /// jira-cli config file (defaults to ~/.config/.jira/.config.yml)
    #[arg(long, global = true, env = "JIRA_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub create: CreateArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Issue type to create
    #[arg(long, global = true, default_value = "Story")]
    pub issue_type: String,

    /// Do not open the new ticket in a browser
    #[arg(long, global = true)]
    pub no_web: bool,

    /// jira-cli executable
    #[arg(long, global = true, default_value = "jira")]
    pub jira_bin: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the ticket (default)
    Create,
    /// Print the rendered description without contacting Jira
    Render,
    /// Write an offline ticket draft instead of creating a ticket
    Draft {
        #[arg(long, short, default_value = "jira_ticket_draft.txt")]
        output: PathBuf,
    },
    /// Verify the token, config file, and jira-cli login
    Check,
}
