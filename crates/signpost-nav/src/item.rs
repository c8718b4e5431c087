//! Navigation tree nodes.

use serde::Serialize;

/// Node in a sidebar navigation tree.
///
/// Serializes without a tag: leaves as `{label, target}`, groups with
/// `target`, `children` and `collapsible` omitted when absent, empty or false.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavItem {
    /// Plain link.
    Leaf {
        /// Display text.
        label: String,
        /// Route path or URL.
        target: String,
    },
    /// Section header, optionally linked, with ordered children.
    Group {
        /// Display text.
        label: String,
        /// Route path or URL of the header itself.
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        /// Child items in declaration order.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<NavItem>,
        /// Whether the rendered group can be collapsed.
        #[serde(skip_serializing_if = "is_false")]
        collapsible: bool,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl NavItem {
    /// Display text.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Group { label, .. } => label,
        }
    }

    /// Link target, if the node has one.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Leaf { target, .. } => Some(target),
            Self::Group { target, .. } => target.as_deref(),
        }
    }

    /// Child items. Always empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[NavItem] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Group { children, .. } => children,
        }
    }

    /// Whether the node renders as a collapsible group.
    #[must_use]
    pub fn is_collapsible(&self) -> bool {
        matches!(
            self,
            Self::Group {
                collapsible: true,
                ..
            }
        )
    }

    /// Iterate over this node and all descendants, depth-first pre-order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Depth-first pre-order iterator over navigation trees.
///
/// Created by [`NavItem::walk`] and [`Sidebar::walk`](crate::Sidebar::walk).
pub struct Walk<'a> {
    stack: Vec<&'a NavItem>,
}

impl<'a> Walk<'a> {
    pub(crate) fn over(roots: &'a [NavItem]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a NavItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children().iter().rev());
        Some(item)
    }
}
