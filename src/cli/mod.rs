//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Rebuild nested Cucumber step trees and resolve scenario status and duration
#[derive(Parser, Debug)]
#[command(name = "steptree", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./.steptree.yaml)
    #[arg(long, global = true, env = "STEPTREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Statuses that must not count as failing, comma separated (e.g. skipped,pending)
    #[arg(long, global = true)]
    pub not_failing: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet logging (only log errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every element as a step tree with its status and duration
    Show(ShowArgs),

    /// Check that step depth markers form a valid tree
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    /// Cucumber JSON report files
    #[arg(required = true)]
    pub reports: Vec<PathBuf>,

    /// Do not print error messages under failing steps
    #[arg(long)]
    pub no_errors: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Cucumber JSON report files
    #[arg(required = true)]
    pub reports: Vec<PathBuf>,
}
