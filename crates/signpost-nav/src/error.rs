//! Build errors and warnings.
//!
//! Every diagnostic carries a location breadcrumb such as
//! `sidebar["/vue2/"] > Rendering > Update` so that a failing site build
//! points at the offending entry.

use std::fmt;

/// Structurally invalid navigation configuration.
///
/// Always fatal: the site build is aborted and the message is surfaced to
/// the invoking pipeline.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Entry has neither a link nor child items.
    #[error("{location}: entry has neither a link nor child items")]
    DeadEnd {
        /// Breadcrumb of the offending entry.
        location: String,
    },
    /// Entry label is empty or whitespace only.
    #[error("{location}: text cannot be empty")]
    EmptyLabel {
        /// Breadcrumb of the offending entry.
        location: String,
    },
    /// Entry declares a link that is empty.
    #[error("{location}: link cannot be empty")]
    EmptyTarget {
        /// Breadcrumb of the offending entry.
        location: String,
    },
    /// Sidebar key is not a path prefix.
    #[error("sidebar prefix {prefix:?} must start with '/' and contain no whitespace, '?' or '#'")]
    InvalidPrefix {
        /// The rejected prefix as written in configuration.
        prefix: String,
    },
}

impl ConfigError {
    /// Breadcrumb of the entry that caused the error.
    ///
    /// For [`ConfigError::InvalidPrefix`] this is the sidebar key itself.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::DeadEnd { location }
            | Self::EmptyLabel { location }
            | Self::EmptyTarget { location } => location,
            Self::InvalidPrefix { prefix } => prefix,
        }
    }
}

/// Non-fatal finding collected while building navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildWarning {
    /// The same link appears twice within one tree.
    DuplicateTarget {
        /// Repeated link.
        target: String,
        /// Breadcrumb of the repeated entry.
        location: String,
        /// Breadcrumb of the first entry using the link.
        first: String,
    },
    /// Link is neither site-absolute nor an external URL.
    RelativeTarget {
        /// Offending link.
        target: String,
        /// Breadcrumb of the entry.
        location: String,
    },
    /// Nav entry declares both a link and dropdown items; the link is dropped.
    IgnoredLink {
        /// Dropped link.
        target: String,
        /// Breadcrumb of the entry.
        location: String,
    },
    /// Sidebar prefix declared more than once; the last declaration wins.
    DuplicatePrefix {
        /// Repeated prefix.
        prefix: String,
    },
    /// Sidebar prefix maps to no sections.
    EmptySidebar {
        /// Prefix with no sections.
        prefix: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTarget {
                target,
                location,
                first,
            } => write!(f, "{location}: link {target:?} already used by {first}"),
            Self::RelativeTarget { target, location } => write!(
                f,
                "{location}: link {target:?} is relative, expected a leading '/'"
            ),
            Self::IgnoredLink { target, location } => write!(
                f,
                "{location}: link {target:?} ignored because the entry has dropdown items"
            ),
            Self::DuplicatePrefix { prefix } => write!(
                f,
                "sidebar prefix {prefix:?} declared more than once, using the last declaration"
            ),
            Self::EmptySidebar { prefix } => write!(f, "sidebar {prefix:?} has no sections"),
        }
    }
}
