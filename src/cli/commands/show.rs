//! Show command implementation.

use super::load_report;
use crate::aggregate::FinalizedFeature;
use crate::cli::ShowArgs;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::format::{TextFormatOptions, format_feature};
use std::io::{self, IsTerminal};
use tracing::{debug, info};

/// Execute the show command.
///
/// Every report is finalized with the configured not-failing statuses. JSON
/// mode prints one array holding the features of all reports.
///
/// # Errors
///
/// Returns an error if a report cannot be read or parsed.
pub fn execute(args: &ShowArgs, config: &ReportConfig, no_color: bool) -> Result<()> {
    info!(
        reports = args.reports.len(),
        not_failing = %config.not_failing,
        "Showing step trees"
    );

    let mut features: Vec<FinalizedFeature> = Vec::new();
    for path in &args.reports {
        let loaded = load_report(path)?;
        features.extend(
            loaded
                .into_iter()
                .map(|feature| feature.finalize(&config.not_failing)),
        );
    }

    let failing = features
        .iter()
        .flat_map(|f| &f.elements)
        .filter(|e| !e.status.is_passed())
        .count();
    debug!(features = features.len(), failing, "Finalized report");

    if config.json {
        println!("{}", serde_json::to_string_pretty(&features)?);
        return Ok(());
    }

    let options = TextFormatOptions {
        use_color: !no_color && io::stdout().is_terminal(),
        show_errors: !args.no_errors,
    };
    for feature in &features {
        print!("{}", format_feature(feature, options));
    }

    Ok(())
}
