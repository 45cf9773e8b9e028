//! CLI command implementations.

mod build;

pub(crate) use build::BuildArgs;
