//! gapticket entry point.

use clap::Parser;
use gapticket_cli::args::{Cli, Command, CreateArgs};
use gapticket_cli::error::CliError;
use gapticket_cli::{check_setup, create_ticket, draft, render_report, telemetry};
use gapticket_tracker::{ApiToken, JiraCliTracker, JiraConfig};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in err.diagnostic_lines() {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        None | Some(Command::Create) => create(cli.config.as_deref(), &cli.create).await,
        Some(Command::Render) => {
            let (_, description) = render_report(&read_stdin()?)?;
            println!("{description}");
            Ok(())
        }
        Some(Command::Draft { output }) => {
            let (report, description) = render_report(&read_stdin()?)?;
            let path = draft::write_draft(&output, &report.summary, &description)?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Command::Check) => {
            let (config, tracker) = connect(cli.config.as_deref(), &cli.create)?;
            for line in check_setup(&tracker, &config).await? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

async fn create(config_path: Option<&Path>, args: &CreateArgs) -> Result<(), CliError> {
    // Token and config are checked before stdin is touched.
    let (_, tracker) = connect(config_path, args)?;
    let input = read_stdin()?;

    let outcome = create_ticket(&tracker, &input, &args.issue_type).await?;
    for warning in &outcome.warnings {
        eprintln!("WARNING: {warning}");
    }
    println!("{}", outcome.key);
    Ok(())
}

fn connect(
    config_path: Option<&Path>,
    args: &CreateArgs,
) -> Result<(JiraConfig, JiraCliTracker), CliError> {
    let token = ApiToken::from_env().ok_or(CliError::MissingToken)?;
    let config = JiraConfig::load(config_path)?;
    tracing::debug!(server = %config.base_url(), project = %config.project.key, "loaded jira config");

    let tracker = JiraCliTracker::new(config.clone(), token)?
        .with_program(args.jira_bin.clone())
        .with_browser(!args.no_web);
    Ok((config, tracker))
}

fn read_stdin() -> Result<String, CliError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(CliError::Stdin)?;
    Ok(input)
}
