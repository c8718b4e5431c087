//! Normalization of raw descriptors into validated navigation.
//!
//! # Rules
//!
//! - A descriptor with items becomes a [`NavItem::Group`]; one with only a
//!   link becomes a [`NavItem::Leaf`] (or an empty collapsible group when
//!   `collapsible` is set).
//! - A descriptor with neither is a dead end and fails the build.
//! - Duplicate links within one tree are reported as warnings, except a
//!   group header repeating its own link on a descendant.
//! - Sidebar prefixes must be path-like; a repeated prefix replaces the
//!   earlier declaration.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use crate::error::{BuildWarning, ConfigError};
use crate::item::NavItem;
use crate::navbar::{NavBar, NavBarEntry, NavLink};
use crate::raw::{RawItem, RawNavEntry, RawNavLink, RawSidebar};
use crate::sidebar::{Sidebar, SidebarMap};

/// Validated, immutable site navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    nav: NavBar,
    sidebar: SidebarMap,
    #[serde(skip)]
    warnings: Vec<BuildWarning>,
}

impl Navigation {
    /// Top-level nav bar.
    #[must_use]
    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    /// Per-prefix sidebars.
    #[must_use]
    pub fn sidebar(&self) -> &SidebarMap {
        &self.sidebar
    }

    /// Non-fatal findings from the build, in discovery order.
    #[must_use]
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Sidebar items for `path`. See [`SidebarMap::resolve`].
    #[must_use]
    pub fn resolve_sidebar(&self, path: &str) -> &[NavItem] {
        self.sidebar.resolve(path)
    }
}

/// Build navigation from raw nav bar entries and sidebar declarations.
///
/// Output sequences keep declaration order. Warnings are kept on the returned
/// [`Navigation`] for the caller to report, and logged at debug level.
///
/// # Errors
///
/// Returns [`ConfigError`] for the first structurally invalid entry: a dead
/// end, an empty label or link, or a malformed sidebar prefix.
pub fn build(
    raw_nav: &[RawNavEntry],
    raw_sidebars: &[RawSidebar],
) -> Result<Navigation, ConfigError> {
    let mut warnings = Vec::new();
    let nav = build_nav_bar(raw_nav, &mut warnings)?;
    let sidebar = build_sidebar_map(raw_sidebars, &mut warnings)?;

    for warning in &warnings {
        tracing::debug!(%warning, "Navigation configuration warning");
    }
    tracing::debug!(
        nav_entries = nav.len(),
        sidebars = sidebar.len(),
        warnings = warnings.len(),
        "Navigation built"
    );

    Ok(Navigation {
        nav,
        sidebar,
        warnings,
    })
}

fn build_nav_bar(
    raw_nav: &[RawNavEntry],
    warnings: &mut Vec<BuildWarning>,
) -> Result<NavBar, ConfigError> {
    let mut tree = TreeContext::new(warnings);
    let mut entries = Vec::with_capacity(raw_nav.len());

    for (index, raw) in raw_nav.iter().enumerate() {
        let location = child_location("nav", &raw.text, index);
        let label = require_label(&raw.text, &location)?;
        let target = optional_target(raw.link.as_deref(), &location)?;

        if raw.items.is_empty() {
            let target = target.ok_or_else(|| ConfigError::DeadEnd {
                location: location.clone(),
            })?;
            tree.check_target(&target, &location, &[]);
            entries.push(NavBarEntry::Link(NavLink { label, target }));
            continue;
        }

        if let Some(target) = target {
            tree.warnings.push(BuildWarning::IgnoredLink {
                target,
                location: location.clone(),
            });
        }
        let mut items = Vec::with_capacity(raw.items.len());
        for (item_index, item) in raw.items.iter().enumerate() {
            items.push(build_nav_link(item, &location, item_index, &mut tree)?);
        }
        entries.push(NavBarEntry::Dropdown { label, items });
    }

    Ok(NavBar::new(entries))
}

fn build_nav_link(
    raw: &RawNavLink,
    parent: &str,
    index: usize,
    tree: &mut TreeContext<'_>,
) -> Result<NavLink, ConfigError> {
    let location = child_location(parent, &raw.text, index);
    let label = require_label(&raw.text, &location)?;
    let target = optional_target(raw.link.as_deref(), &location)?
        .ok_or_else(|| ConfigError::DeadEnd {
            location: location.clone(),
        })?;
    tree.check_target(&target, &location, &[]);
    Ok(NavLink { label, target })
}

fn build_sidebar_map(
    raw_sidebars: &[RawSidebar],
    warnings: &mut Vec<BuildWarning>,
) -> Result<SidebarMap, ConfigError> {
    let mut sidebars: Vec<Sidebar> = Vec::with_capacity(raw_sidebars.len());

    for raw in raw_sidebars {
        if !is_valid_prefix(&raw.prefix) {
            return Err(ConfigError::InvalidPrefix {
                prefix: raw.prefix.clone(),
            });
        }

        let root = format!("sidebar[{:?}]", raw.prefix);
        let mut tree = TreeContext::new(warnings);
        let mut ancestors = Vec::new();
        let mut items = Vec::with_capacity(raw.sections.len());
        for (index, section) in raw.sections.iter().enumerate() {
            let location = child_location(&root, &section.text, index);
            items.push(build_item(section, location, &mut ancestors, &mut tree)?);
        }

        if items.is_empty() {
            warnings.push(BuildWarning::EmptySidebar {
                prefix: raw.prefix.clone(),
            });
        }
        if let Some(pos) = sidebars.iter().position(|s| s.prefix() == raw.prefix) {
            sidebars.remove(pos);
            warnings.push(BuildWarning::DuplicatePrefix {
                prefix: raw.prefix.clone(),
            });
        }
        sidebars.push(Sidebar::new(raw.prefix.clone(), items));
    }

    Ok(SidebarMap::new(sidebars))
}

/// Build one sidebar node and its subtree.
///
/// `ancestors` holds the links of enclosing groups so a header repeated on
/// its own descendant is not reported as a duplicate.
fn build_item(
    raw: &RawItem,
    location: String,
    ancestors: &mut Vec<String>,
    tree: &mut TreeContext<'_>,
) -> Result<NavItem, ConfigError> {
    let label = require_label(&raw.text, &location)?;
    let target = optional_target(raw.link.as_deref(), &location)?;
    if let Some(target) = &target {
        tree.check_target(target, &location, ancestors);
    }

    if raw.items.is_empty() {
        return match target {
            None => Err(ConfigError::DeadEnd { location }),
            Some(target) if !raw.collapsible => Ok(NavItem::Leaf { label, target }),
            Some(target) => Ok(NavItem::Group {
                label,
                target: Some(target),
                children: Vec::new(),
                collapsible: true,
            }),
        };
    }

    if let Some(target) = &target {
        ancestors.push(target.clone());
    }
    let mut children = Vec::with_capacity(raw.items.len());
    for (index, child) in raw.items.iter().enumerate() {
        let child_loc = child_location(&location, &child.text, index);
        children.push(build_item(child, child_loc, ancestors, tree)?);
    }
    if target.is_some() {
        ancestors.pop();
    }

    Ok(NavItem::Group {
        label,
        target,
        children,
        collapsible: raw.collapsible,
    })
}

/// Per-tree duplicate link tracking.
struct TreeContext<'w> {
    /// Link to breadcrumb of its first use.
    seen: HashMap<String, String>,
    warnings: &'w mut Vec<BuildWarning>,
}

impl<'w> TreeContext<'w> {
    fn new(warnings: &'w mut Vec<BuildWarning>) -> Self {
        Self {
            seen: HashMap::new(),
            warnings,
        }
    }

    fn check_target(&mut self, target: &str, location: &str, ancestors: &[String]) {
        if !is_absolute_target(target) {
            self.warnings.push(BuildWarning::RelativeTarget {
                target: target.to_owned(),
                location: location.to_owned(),
            });
        }

        if ancestors.iter().any(|a| a == target) {
            return;
        }
        match self.seen.entry(target.to_owned()) {
            Entry::Occupied(first) => self.warnings.push(BuildWarning::DuplicateTarget {
                target: target.to_owned(),
                location: location.to_owned(),
                first: first.get().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(location.to_owned());
            }
        }
    }
}

/// Breadcrumb for the `index`-th child of `parent`, falling back to a
/// 1-based position when the label is blank.
fn child_location(parent: &str, label: &str, index: usize) -> String {
    if label.trim().is_empty() {
        format!("{parent} > #{}", index + 1)
    } else {
        format!("{parent} > {label}")
    }
}

fn require_label(text: &str, location: &str) -> Result<String, ConfigError> {
    if text.trim().is_empty() {
        return Err(ConfigError::EmptyLabel {
            location: location.to_owned(),
        });
    }
    Ok(text.to_owned())
}

fn optional_target(link: Option<&str>, location: &str) -> Result<Option<String>, ConfigError> {
    match link {
        Some(link) if link.trim().is_empty() => Err(ConfigError::EmptyTarget {
            location: location.to_owned(),
        }),
        Some(link) => Ok(Some(link.to_owned())),
        None => Ok(None),
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    prefix.starts_with('/')
        && !prefix
            .chars()
            .any(|c| c.is_whitespace() || c == '?' || c == '#')
}

fn is_absolute_target(target: &str) -> bool {
    target.starts_with('/') || target.contains("://") || target.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn nav_entries(value: serde_json::Value) -> Vec<RawNavEntry> {
        serde_json::from_value(value).unwrap()
    }

    fn sidebars(value: serde_json::Value) -> Vec<RawSidebar> {
        serde_json::from_value(value).unwrap()
    }

    fn vue_sidebars() -> Vec<RawSidebar> {
        sidebars(json!([
            {
                "prefix": "/vue2/",
                "sections": [
                    {
                        "text": "简介",
                        "collapsible": true,
                        "items": [
                            { "text": "介绍", "link": "/vue2/introduction/index" },
                            { "text": "目录结构", "link": "/vue2/introduction/a" }
                        ]
                    },
                    {
                        "text": "响应式原理",
                        "link": "/vue2/observe/collect",
                        "collapsible": true,
                        "items": [
                            { "text": "收集依赖", "link": "/vue2/observe/collect" },
                            { "text": "派发更新", "link": "/vue2/observe/dispatch" }
                        ]
                    }
                ]
            },
            {
                "prefix": "/vue3/",
                "sections": [
                    {
                        "text": "准备工作",
                        "items": [
                            { "text": "前言", "link": "/vue3/introduction/start" },
                            { "text": "源码目录", "link": "/vue3/introduction/structure" }
                        ]
                    }
                ]
            }
        ]))
    }

    #[test]
    fn test_build_normalizes_sections() {
        let navigation = build(&[], &vue_sidebars()).unwrap();

        let vue2 = navigation.sidebar().get("/vue2/").unwrap();
        assert_eq!(
            vue2.items()[0],
            NavItem::Group {
                label: "简介".to_owned(),
                target: None,
                children: vec![
                    NavItem::Leaf {
                        label: "介绍".to_owned(),
                        target: "/vue2/introduction/index".to_owned(),
                    },
                    NavItem::Leaf {
                        label: "目录结构".to_owned(),
                        target: "/vue2/introduction/a".to_owned(),
                    },
                ],
                collapsible: true,
            }
        );
        assert_eq!(vue2.items()[1].target(), Some("/vue2/observe/collect"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let nav = nav_entries(json!([{ "text": "Vue3", "link": "/vue3/introduction/start" }]));
        let sidebars = vue_sidebars();

        let first = build(&nav, &sidebars).unwrap();
        let second = build(&nav, &sidebars).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_preserves_child_order() {
        let navigation = build(&[], &vue_sidebars()).unwrap();

        let labels: Vec<_> = navigation.sidebar().get("/vue3/").unwrap().items()[0]
            .children()
            .iter()
            .map(NavItem::label)
            .collect();

        assert_eq!(labels, vec!["前言", "源码目录"]);
    }

    #[test]
    fn test_build_resolves_vue3_sidebar() {
        let navigation = build(&[], &vue_sidebars()).unwrap();

        let items = navigation.resolve_sidebar("/vue3/introduction/start");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label(), "准备工作");
        assert!(navigation.resolve_sidebar("/unknown/path").is_empty());
    }

    #[test]
    fn test_build_section_without_link_or_items_is_dead_end() {
        let raw = sidebars(json!([
            { "prefix": "/vue2/", "sections": [{ "text": "其他", "items": [] }] }
        ]));

        let err = build(&[], &raw).unwrap_err();

        assert_eq!(
            err,
            ConfigError::DeadEnd {
                location: "sidebar[\"/vue2/\"] > 其他".to_owned()
            }
        );
    }

    #[test]
    fn test_build_nested_dead_end_reports_full_location() {
        let raw = sidebars(json!([
            {
                "prefix": "/node/",
                "sections": [{ "text": "脚手架", "items": [{ "text": "lerna解析" }] }]
            }
        ]));

        let err = build(&[], &raw).unwrap_err();

        assert_eq!(err.location(), "sidebar[\"/node/\"] > 脚手架 > lerna解析");
    }

    #[test]
    fn test_build_empty_link_is_error() {
        let raw = sidebars(json!([
            {
                "prefix": "/node/",
                "sections": [{ "text": "脚手架", "items": [{ "text": "脚手架常用库", "link": "" }] }]
            }
        ]));

        let err = build(&[], &raw).unwrap_err();

        assert!(matches!(err, ConfigError::EmptyTarget { .. }));
        assert!(err.to_string().contains("脚手架常用库"));
    }

    #[test]
    fn test_build_empty_label_uses_position() {
        let raw = nav_entries(json!([
            { "text": "Node", "link": "/node/" },
            { "text": "  ", "link": "/x" }
        ]));

        let err = build(&raw, &[]).unwrap_err();

        assert_eq!(
            err,
            ConfigError::EmptyLabel {
                location: "nav > #2".to_owned()
            }
        );
    }

    #[test]
    fn test_build_rejects_prefix_without_leading_slash() {
        let raw = sidebars(json!([{ "prefix": "vue3/", "sections": [] }]));

        let err = build(&[], &raw).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidPrefix {
                prefix: "vue3/".to_owned()
            }
        );
    }

    #[test]
    fn test_build_rejects_prefix_with_whitespace() {
        let raw = sidebars(json!([{ "prefix": "/vue 3/", "sections": [] }]));

        assert!(matches!(
            build(&[], &raw),
            Err(ConfigError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_build_nav_bar_links_and_dropdowns() {
        let raw = nav_entries(json!([
            { "text": "vue3源码", "link": "/vue3/introduction/start" },
            {
                "text": "其他",
                "items": [
                    { "text": "webpack源码", "link": "/webpack/introduction/index" },
                    { "text": "vite源码", "link": "/vite/introduction/index" }
                ]
            }
        ]));

        let navigation = build(&raw, &[]).unwrap();

        assert_eq!(
            navigation.nav().entries(),
            &[
                NavBarEntry::Link(NavLink {
                    label: "vue3源码".to_owned(),
                    target: "/vue3/introduction/start".to_owned(),
                }),
                NavBarEntry::Dropdown {
                    label: "其他".to_owned(),
                    items: vec![
                        NavLink {
                            label: "webpack源码".to_owned(),
                            target: "/webpack/introduction/index".to_owned(),
                        },
                        NavLink {
                            label: "vite源码".to_owned(),
                            target: "/vite/introduction/index".to_owned(),
                        },
                    ],
                },
            ]
        );
        assert!(navigation.warnings().is_empty());
    }

    #[test]
    fn test_build_empty_dropdown_is_dead_end() {
        let raw = nav_entries(json!([{ "text": "其他", "items": [] }]));

        let err = build(&raw, &[]).unwrap_err();

        assert_eq!(
            err,
            ConfigError::DeadEnd {
                location: "nav > 其他".to_owned()
            }
        );
    }

    #[test]
    fn test_build_dropdown_link_without_target_is_dead_end() {
        let raw = nav_entries(json!([{ "text": "Tools", "items": [{ "text": "Axios" }] }]));

        let err = build(&raw, &[]).unwrap_err();

        assert_eq!(err.location(), "nav > Tools > Axios");
    }

    #[test]
    fn test_build_dropdown_with_link_warns() {
        let raw = nav_entries(json!([
            { "text": "Tools", "link": "/tools", "items": [{ "text": "Axios", "link": "/axios" }] }
        ]));

        let navigation = build(&raw, &[]).unwrap();

        assert!(matches!(
            navigation.nav().entries()[0],
            NavBarEntry::Dropdown { .. }
        ));
        assert_eq!(
            navigation.warnings(),
            &[BuildWarning::IgnoredLink {
                target: "/tools".to_owned(),
                location: "nav > Tools".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_header_sharing_child_target_is_not_duplicate() {
        let navigation = build(&[], &vue_sidebars()).unwrap();

        assert!(navigation.warnings().is_empty());
    }

    #[test]
    fn test_build_duplicate_target_in_sidebar_warns() {
        let raw = sidebars(json!([
            {
                "prefix": "/guide/",
                "sections": [
                    { "text": "A", "items": [{ "text": "Start", "link": "/guide/start" }] },
                    { "text": "B", "items": [{ "text": "Again", "link": "/guide/start" }] }
                ]
            }
        ]));

        let navigation = build(&[], &raw).unwrap();

        assert_eq!(
            navigation.warnings(),
            &[BuildWarning::DuplicateTarget {
                target: "/guide/start".to_owned(),
                location: "sidebar[\"/guide/\"] > B > Again".to_owned(),
                first: "sidebar[\"/guide/\"] > A > Start".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_same_target_in_different_sidebars_is_fine() {
        let raw = sidebars(json!([
            { "prefix": "/vue2/", "sections": [{ "text": "Other", "link": "/guide/other/index" }] },
            { "prefix": "/vue3/", "sections": [{ "text": "Other", "link": "/guide/other/index" }] }
        ]));

        let navigation = build(&[], &raw).unwrap();

        assert!(navigation.warnings().is_empty());
    }

    #[test]
    fn test_build_relative_target_warns() {
        let raw = nav_entries(json!([
            { "text": "前端工具库", "link": "front-end-utils/axios/start" },
            { "text": "GitHub", "link": "https://github.com/vuejs/vitepress" }
        ]));

        let navigation = build(&raw, &[]).unwrap();

        assert_eq!(
            navigation.warnings(),
            &[BuildWarning::RelativeTarget {
                target: "front-end-utils/axios/start".to_owned(),
                location: "nav > 前端工具库".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_empty_sidebar_warns() {
        let raw = sidebars(json!([{ "prefix": "/webpack/", "sections": [] }]));

        let navigation = build(&[], &raw).unwrap();

        assert!(navigation.sidebar().get("/webpack/").unwrap().items().is_empty());
        assert_eq!(
            navigation.warnings(),
            &[BuildWarning::EmptySidebar {
                prefix: "/webpack/".to_owned()
            }]
        );
    }

    #[test]
    fn test_build_duplicate_prefix_last_wins() {
        let raw = sidebars(json!([
            { "prefix": "/node/", "sections": [{ "text": "Old", "link": "/node/old" }] },
            { "prefix": "/vue3/", "sections": [{ "text": "Vue", "link": "/vue3/a" }] },
            { "prefix": "/node/", "sections": [{ "text": "New", "link": "/node/new" }] }
        ]));

        let navigation = build(&[], &raw).unwrap();

        assert_eq!(navigation.sidebar().len(), 2);
        assert_eq!(navigation.resolve_sidebar("/node/x")[0].label(), "New");
        assert_eq!(
            navigation.warnings(),
            &[BuildWarning::DuplicatePrefix {
                prefix: "/node/".to_owned()
            }]
        );
    }

    #[test]
    fn test_build_collapsible_link_without_items_is_group() {
        let raw = sidebars(json!([
            {
                "prefix": "/koa/",
                "sections": [{ "text": "koa源码解析", "link": "/koa/start", "collapsible": true }]
            }
        ]));

        let navigation = build(&[], &raw).unwrap();

        let item = &navigation.resolve_sidebar("/koa/start")[0];
        assert!(item.is_collapsible());
        assert_eq!(item.target(), Some("/koa/start"));
        assert!(item.children().is_empty());
    }

    #[test]
    fn test_navigation_serialization() {
        let nav = nav_entries(json!([{ "text": "Node", "link": "/node/detect-port" }]));
        let raw = sidebars(json!([
            { "prefix": "/node/", "sections": [{ "text": "dotenv", "link": "/node/dotenv" }] }
        ]));
        let navigation = build(&nav, &raw).unwrap();

        let json = serde_json::to_value(&navigation).unwrap();

        assert_eq!(
            json,
            json!({
                "nav": [{ "label": "Node", "target": "/node/detect-port" }],
                "sidebar": {
                    "/node/": [{ "label": "dotenv", "target": "/node/dotenv" }]
                }
            })
        );
    }

    #[test]
    fn test_is_valid_prefix() {
        assert!(is_valid_prefix("/"));
        assert!(is_valid_prefix("/node/module/"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("node/"));
        assert!(!is_valid_prefix("/node/?x"));
        assert!(!is_valid_prefix("/node/#x"));
    }
}
