//! Top-level navigation bar.

use serde::Serialize;

/// Label and target pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display text.
    pub label: String,
    /// Route path or URL.
    pub target: String,
}

/// Nav bar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavBarEntry {
    /// Direct link.
    Link(NavLink),
    /// Dropdown menu of links.
    Dropdown {
        /// Display text.
        label: String,
        /// Links in declaration order.
        items: Vec<NavLink>,
    },
}

/// Ordered sequence of top-level entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavBar {
    entries: Vec<NavBarEntry>,
}

impl NavBar {
    pub(crate) fn new(entries: Vec<NavBarEntry>) -> Self {
        Self { entries }
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[NavBarEntry] {
        &self.entries
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the nav bar has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over every link, flattening dropdowns.
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        self.entries.iter().flat_map(|entry| match entry {
            NavBarEntry::Link(link) => std::slice::from_ref(link),
            NavBarEntry::Dropdown { items, .. } => items.as_slice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(label: &str, target: &str) -> NavLink {
        NavLink {
            label: label.to_owned(),
            target: target.to_owned(),
        }
    }

    #[test]
    fn test_links_flattens_dropdowns() {
        let nav = NavBar::new(vec![
            NavBarEntry::Link(link("Vue3", "/vue3/introduction/start")),
            NavBarEntry::Dropdown {
                label: "Tools".to_owned(),
                items: vec![link("Axios", "/axios"), link("Lodash", "/lodash")],
            },
        ]);

        let targets: Vec<_> = nav.links().map(|l| l.target.as_str()).collect();

        assert_eq!(nav.len(), 2);
        assert_eq!(targets, vec!["/vue3/introduction/start", "/axios", "/lodash"]);
    }

    #[test]
    fn test_serialization_shapes() {
        let nav = NavBar::new(vec![
            NavBarEntry::Link(link("Node", "/node/detect-port")),
            NavBarEntry::Dropdown {
                label: "Tools".to_owned(),
                items: vec![link("Axios", "/axios")],
            },
        ]);

        let json = serde_json::to_value(&nav).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "label": "Node", "target": "/node/detect-port" },
                { "label": "Tools", "items": [{ "label": "Axios", "target": "/axios" }] }
            ])
        );
    }
}
