//! CLI command implementations.

pub(crate) mod chains;
pub(crate) mod info;
pub(crate) mod query;
