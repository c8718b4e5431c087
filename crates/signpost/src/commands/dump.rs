//! `signpost dump` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use signpost_config::{CliSettings, SiteConfig, SiteMeta, SocialLink};
use signpost_nav::Navigation;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the dump command.
#[derive(Args)]
pub(crate) struct DumpArgs {
    /// Path to configuration file (default: auto-discover signpost.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site base path (overrides config).
    #[arg(long)]
    base: Option<String>,

    /// Build output directory (overrides config).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Emit compact JSON on a single line.
    #[arg(long)]
    compact: bool,
}

/// Everything a renderer needs, in one document.
#[derive(Serialize)]
struct SiteNavigation<'a> {
    site: &'a SiteMeta,
    #[serde(rename = "outDir")]
    out_dir: &'a Path,
    #[serde(rename = "socialLinks")]
    social_links: &'a [SocialLink],
    #[serde(flatten)]
    navigation: &'a Navigation,
}

impl DumpArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base: self.base,
            out_dir: self.out_dir,
        };
        let config = SiteConfig::load(self.config.as_deref(), Some(&cli_settings))?;
        let navigation = config.navigation()?;

        let document = SiteNavigation::new(&config, &navigation);
        let json = if self.compact {
            serde_json::to_string(&document)?
        } else {
            serde_json::to_string_pretty(&document)?
        };

        output.result(&json)?;
        Ok(())
    }
}

impl<'a> SiteNavigation<'a> {
    fn new(config: &'a SiteConfig, navigation: &'a Navigation) -> Self {
        Self {
            site: &config.site,
            out_dir: &config.build_resolved.out_dir,
            social_links: &config.social_links,
            navigation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_document_carries_out_dir_and_navigation() {
        let mut config = SiteConfig::default();
        config.build_resolved.out_dir = PathBuf::from("/srv/rookie-blog/dist");
        config.nav = serde_json::from_value(json!([
            { "text": "Node", "link": "/node/detect-port" }
        ]))
        .unwrap();
        config.sidebar = serde_json::from_value(json!([
            { "prefix": "/node/", "sections": [{ "text": "ora", "link": "/node/ora" }] }
        ]))
        .unwrap();
        let navigation = config.navigation().unwrap();

        let value = serde_json::to_value(SiteNavigation::new(&config, &navigation)).unwrap();

        assert_eq!(value["outDir"], json!("/srv/rookie-blog/dist"));
        assert_eq!(value["socialLinks"], json!([]));
        assert_eq!(
            value["nav"],
            json!([{ "label": "Node", "target": "/node/detect-port" }])
        );
        assert_eq!(
            value["sidebar"],
            json!({ "/node/": [{ "label": "ora", "target": "/node/ora" }] })
        );
    }
}
