//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod dump;
pub(crate) mod resolve;

pub(crate) use check::CheckArgs;
pub(crate) use dump::DumpArgs;
pub(crate) use resolve::ResolveArgs;
