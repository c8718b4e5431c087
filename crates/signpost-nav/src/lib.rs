//! Navigation tree building for Signpost.
//!
//! Turns declarative nav bar and sidebar descriptors into a validated,
//! immutable [`Navigation`], and maps page paths to their sidebar by
//! longest-prefix match.
//!
//! # Example
//!
//! ```
//! use signpost_nav::{RawItem, RawSidebar, build, resolve_sidebar};
//!
//! let sidebars = vec![RawSidebar {
//!     prefix: "/vue3/".to_owned(),
//!     sections: vec![RawItem::section(
//!         "Introduction",
//!         vec![RawItem::link("Start", "/vue3/introduction/start")],
//!     )],
//! }];
//!
//! let navigation = build(&[], &sidebars)?;
//! let items = resolve_sidebar("/vue3/introduction/start", navigation.sidebar());
//! assert_eq!(items[0].label(), "Introduction");
//! assert!(navigation.resolve_sidebar("/unknown/path").is_empty());
//! # Ok::<(), signpost_nav::ConfigError>(())
//! ```

mod builder;
mod error;
mod item;
mod navbar;
mod raw;
mod sidebar;

pub use builder::{Navigation, build};
pub use error::{BuildWarning, ConfigError};
pub use item::{NavItem, Walk};
pub use navbar::{NavBar, NavBarEntry, NavLink};
pub use raw::{RawItem, RawNavEntry, RawNavLink, RawSidebar};
pub use sidebar::{Sidebar, SidebarMap, normalize_path, resolve_sidebar};
