//! Raw navigation descriptors as written in configuration.
//!
//! Field names follow the site configuration vocabulary (`text`, `link`,
//! `items`, `collapsible`). They are normalized by [`build`](crate::build).

use serde::Deserialize;

/// Top-level nav bar entry: a direct link or a dropdown of links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawNavEntry {
    /// Display text.
    pub text: String,
    /// Link target.
    #[serde(default)]
    pub link: Option<String>,
    /// Dropdown links.
    #[serde(default)]
    pub items: Vec<RawNavLink>,
}

/// Link inside a nav bar dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawNavLink {
    /// Display text.
    pub text: String,
    /// Link target.
    #[serde(default)]
    pub link: Option<String>,
}

/// Sidebar section or item. Sections and items share one shape and nest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawItem {
    /// Display text.
    pub text: String,
    /// Link target.
    #[serde(default)]
    pub link: Option<String>,
    /// Whether the rendered group can be collapsed.
    #[serde(default)]
    pub collapsible: bool,
    /// Child items in display order.
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// Sidebar declaration for one route prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawSidebar {
    /// Route prefix, e.g. `/vue3/`.
    pub prefix: String,
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<RawItem>,
}

impl RawItem {
    /// Create a link item.
    #[must_use]
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Create a section header without a link.
    #[must_use]
    pub fn section(text: impl Into<String>, items: Vec<RawItem>) -> Self {
        Self {
            text: text.into(),
            items,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_section_with_defaults() {
        let raw: RawItem = serde_json::from_value(serde_json::json!({
            "text": "准备工作",
            "items": [{ "text": "前言", "link": "/vue3/introduction/start" }]
        }))
        .unwrap();

        assert_eq!(
            raw,
            RawItem::section(
                "准备工作",
                vec![RawItem::link("前言", "/vue3/introduction/start")]
            )
        );
        assert!(!raw.collapsible);
    }

    #[test]
    fn test_deserialize_sidebar_without_sections() {
        let raw: RawSidebar =
            serde_json::from_value(serde_json::json!({ "prefix": "/webpack/" })).unwrap();

        assert_eq!(raw.prefix, "/webpack/");
        assert!(raw.sections.is_empty());
    }

    #[test]
    fn test_deserialize_nav_dropdown() {
        let raw: RawNavEntry = serde_json::from_value(serde_json::json!({
            "text": "Tools",
            "items": [{ "text": "Axios", "link": "/utils/axios/start" }]
        }))
        .unwrap();

        assert!(raw.link.is_none());
        assert_eq!(raw.items.len(), 1);
        assert_eq!(raw.items[0].link.as_deref(), Some("/utils/axios/start"));
    }
}
