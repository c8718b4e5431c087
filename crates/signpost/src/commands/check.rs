//! `signpost check` command implementation.

use std::path::PathBuf;

use clap::Args;
use signpost_config::SiteConfig;
use signpost_nav::Navigation;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover signpost.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat warnings as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, or if `--strict` is set
    /// and the build produced warnings.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = SiteConfig::load(self.config.as_deref(), None)?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        } else {
            output.info("Config: none found, using defaults");
        }

        let navigation = config.navigation()?;

        for warning in navigation.warnings() {
            output.warning(&format!("warning: {warning}"));
        }

        output.success(&summary(&navigation));

        let warning_count = navigation.warnings().len();
        if self.strict && warning_count > 0 {
            return Err(CliError::Validation(format!(
                "{warning_count} warning(s) reported with --strict"
            )));
        }

        Ok(())
    }
}

/// One-line count of what the navigation contains.
fn summary(navigation: &Navigation) -> String {
    let item_count: usize = navigation
        .sidebar()
        .sidebars()
        .iter()
        .map(|sidebar| sidebar.walk().count())
        .sum();
    format!(
        "Navigation OK: {} nav entries ({} links), {} sidebars, {item_count} sidebar items",
        navigation.nav().len(),
        navigation.nav().links().count(),
        navigation.sidebar().len(),
    )
}
