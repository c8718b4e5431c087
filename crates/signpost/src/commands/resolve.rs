//! `signpost resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use signpost_config::SiteConfig;
use signpost_nav::{NavItem, Sidebar, normalize_path};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Page path to resolve, e.g. `/vue3/introduction/start`.
    path: String,

    /// Path to configuration file (default: auto-discover signpost.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the sidebar as JSON instead of a tree.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Resolved<'a> {
    path: &'a str,
    prefix: Option<&'a str>,
    items: &'a [NavItem],
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = SiteConfig::load(self.config.as_deref(), None)?;
        let navigation = config.navigation()?;
        let path = normalize_path(&self.path);
        let entry = navigation.sidebar().resolve_entry(&path);

        if self.json {
            let resolved = Resolved {
                path: &path,
                prefix: entry.map(Sidebar::prefix),
                items: entry.map(Sidebar::items).unwrap_or_default(),
            };
            output.result(&serde_json::to_string_pretty(&resolved)?)?;
            return Ok(());
        }

        let Some(sidebar) = entry else {
            output.info(&format!("No sidebar for {path}"));
            return Ok(());
        };

        output.highlight(&format!("Sidebar {}", sidebar.prefix()));
        for line in render_tree(sidebar, &path) {
            let line = match line.strip_suffix(ACTIVE_MARK) {
                Some(text) => format!("{text}{}", output.dimmed(ACTIVE_MARK)),
                None => line,
            };
            output.result(&line)?;
        }
        Ok(())
    }
}

/// Suffix appended to the entry linking to the resolved page.
const ACTIVE_MARK: &str = "  <- current";

/// Render a sidebar as indented lines, marking the first entry linking to
/// `path`.
fn render_tree(sidebar: &Sidebar, path: &str) -> Vec<String> {
    fn render(item: &NavItem, depth: usize, active: Option<&NavItem>, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        let marker = if item.is_collapsible() { "+" } else { "-" };
        let mut line = match item.target() {
            Some(target) => format!("{indent}{marker} {} ({target})", item.label()),
            None => format!("{indent}{marker} {}", item.label()),
        };
        if active.is_some_and(|active| std::ptr::eq(active, item)) {
            line.push_str(ACTIVE_MARK);
        }
        lines.push(line);
        for child in item.children() {
            render(child, depth + 1, active, lines);
        }
    }

    let active = sidebar.find_target(&normalize_path(path));
    let mut lines = Vec::new();
    for item in sidebar.items() {
        render(item, 0, active, &mut lines);
    }
    lines
}
