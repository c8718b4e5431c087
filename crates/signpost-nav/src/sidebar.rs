//! Per-route sidebars and longest-prefix resolution.

use std::borrow::Cow;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::item::{NavItem, Walk};

/// Sidebar shown for routes under one prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sidebar {
    prefix: String,
    items: Vec<NavItem>,
}

impl Sidebar {
    pub(crate) fn new(prefix: String, items: Vec<NavItem>) -> Self {
        Self { prefix, items }
    }

    /// Route prefix this sidebar applies to.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Top-level trees in declaration order.
    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Iterate over every node, depth-first pre-order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::over(&self.items)
    }

    /// Find the first node linking to `target`.
    ///
    /// Used by renderers to highlight the active entry. `target` is compared
    /// verbatim; pass it through [`normalize_path`] first.
    #[must_use]
    pub fn find_target(&self, target: &str) -> Option<&NavItem> {
        self.walk().find(|item| item.target() == Some(target))
    }
}

/// Ordered mapping from route prefix to sidebar.
///
/// Prefixes are unique. Serializes as a JSON-style object keyed by prefix,
/// preserving declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarMap {
    sidebars: Vec<Sidebar>,
}

impl SidebarMap {
    pub(crate) fn new(sidebars: Vec<Sidebar>) -> Self {
        Self { sidebars }
    }

    /// Sidebars in declaration order.
    #[must_use]
    pub fn sidebars(&self) -> &[Sidebar] {
        &self.sidebars
    }

    /// Number of configured prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// Whether no prefixes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Get the sidebar declared for exactly `prefix`.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&Sidebar> {
        self.sidebars.iter().find(|sidebar| sidebar.prefix == prefix)
    }

    /// Find the sidebar whose prefix is the longest prefix of `path`.
    ///
    /// A path without a leading slash is treated as site-absolute. On equal
    /// prefix length the earliest declared sidebar wins.
    #[must_use]
    pub fn resolve_entry(&self, path: &str) -> Option<&Sidebar> {
        let path = normalize_path(path);
        let mut best: Option<&Sidebar> = None;
        for sidebar in &self.sidebars {
            if !path.starts_with(sidebar.prefix.as_str()) {
                continue;
            }
            if best.is_none_or(|current| sidebar.prefix.len() > current.prefix.len()) {
                best = Some(sidebar);
            }
        }
        best
    }

    /// Sidebar items for `path`, or an empty slice when no prefix matches.
    #[must_use]
    pub fn resolve(&self, path: &str) -> &[NavItem] {
        self.resolve_entry(path)
            .map(Sidebar::items)
            .unwrap_or_default()
    }
}

/// Sidebar items for `path` in `sidebar_map`.
///
/// Never fails: a page without a matching prefix renders without a sidebar.
#[must_use]
pub fn resolve_sidebar<'a>(path: &str, sidebar_map: &'a SidebarMap) -> &'a [NavItem] {
    sidebar_map.resolve(path)
}

/// Page path with a leading slash, as used for prefix and target matching.
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

impl Serialize for SidebarMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sidebars.len()))?;
        for sidebar in &self.sidebars {
            map.serialize_entry(&sidebar.prefix, &sidebar.items)?;
        }
        map.end()
    }
}
