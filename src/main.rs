use clap::Parser;
use std::env;
use std::io::{self, IsTerminal};
use steptree::cli::commands;
use steptree::cli::{Cli, Commands};
use steptree::config::{self, ReportConfig};
use steptree::logging::init_logging;
use steptree::{Result, StepTreeError, StructuredError};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, None) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let overrides = build_cli_overrides(&cli);

    let report_config = match load_report_config(&overrides) {
        Ok(report_config) => report_config,
        Err(e) => handle_error(&e, error_json_mode(&cli, None)),
    };

    let result = match &cli.command {
        Commands::Show(args) => commands::show::execute(args, &report_config, cli.no_color),
        Commands::Validate(args) => commands::validate::execute(args, &report_config),
    };

    if let Err(e) = result {
        handle_error(&e, error_json_mode(&cli, Some(&report_config)));
    }
}

/// JSON error output follows the resolved config once it has loaded, so
/// `json: true` from a config file or `STEPTREE_JSON` applies to errors too.
fn error_json_mode(cli: &Cli, report_config: Option<&ReportConfig>) -> bool {
    report_config.map_or(cli.json, |config| config.json)
}

fn load_report_config(overrides: &config::CliOverrides) -> Result<ReportConfig> {
    let cwd = env::current_dir()?;
    let layer = config::load_config(&cwd, overrides)?;
    ReportConfig::from_layer(&layer)
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &StepTreeError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> config::CliOverrides {
    config::CliOverrides {
        config: cli.config.clone(),
        not_failing: cli.not_failing.clone(),
        json: cli.json.then_some(true),
    }
}
