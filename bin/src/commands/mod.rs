//! CLI command implementations.

pub(crate) mod features;
pub(crate) mod inspect;
pub(crate) mod rewrite;
