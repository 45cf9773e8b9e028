//! CLI error types.

use wikibook_build::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("build finished with {pages} failed page(s)")]
    PagesFailed {
        /// Number of pages that produced no output.
        pages: usize,
    },
}
