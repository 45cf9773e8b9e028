//! `build` command: generate a static wiki from a JSON map.

use std::path::PathBuf;

use clap::Args;
use wikibook_build::{BuildOptions, BuildReport};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `build` command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to the wiki map JSON file.
    #[arg(long, default_value = "wikimap.json")]
    map: PathBuf,

    /// Output directory (regenerated from scratch on every build).
    #[arg(long, default_value = "dist")]
    target: PathBuf,

    /// Template directory with the base page and static assets.
    #[arg(long, default_value = "template")]
    template: PathBuf,

    /// Enable verbose (info-level) logging.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Run the build and report the outcome.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let options = BuildOptions {
            map_path: self.map.clone(),
            target_dir: self.target.clone(),
            template_dir: self.template.clone(),
        };

        let report = wikibook_build::build(&options)?;
        print_report(output, &report, &self.target);

        if report.success() {
            Ok(())
        } else {
            Err(CliError::PagesFailed {
                pages: report.failures.len(),
            })
        }
    }
}

/// Print warnings, failures and the final summary line.
fn print_report(output: &Output, report: &BuildReport, target: &std::path::Path) {
    for warning in &report.warnings {
        output.warning(&format!("warning: {warning}"));
    }

    for failure in &report.failures {
        let location = match &failure.category {
            Some(category) => format!("{} > {}", category, failure.page),
            None => failure.page.clone(),
        };
        output.error(&format!(
            "failed: {location} ({}): {}",
            failure.content_path, failure.error
        ));
    }

    let summary = format!(
        "Built {} page(s) into {}",
        report.pages_written + usize::from(report.index_written),
        target.display()
    );
    if report.success() {
        output.success(&summary);
    } else {
        output.info(&summary);
    }
}
