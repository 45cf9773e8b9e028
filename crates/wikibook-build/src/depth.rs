//! Path depth resolution for nested output pages.
//!
//! Generated pages live under `pages/<contentPath>` in the output tree, while
//! the menu links and stylesheet references in the page template are authored
//! relative to the output root. Every page therefore needs a "go up N
//! directories" prefix prepended to those references, where N depends on how
//! deeply the page is nested.

/// Compute the relative-path-up prefix for a page's content path.
///
/// Counts path separators to determine nesting depth and returns one `../`
/// hop per level, plus one extra hop for the `pages/` directory every page
/// lives under. A separator-free path still gets exactly one hop.
///
/// The index page sits at the output root and uses an empty prefix instead.
///
/// # Examples
///
/// ```
/// use wikibook_build::depth_prefix;
///
/// assert_eq!(depth_prefix("intro.html"), "../");
/// assert_eq!(depth_prefix("setup/install.html"), "../../");
/// assert_eq!(depth_prefix("a/b/c.html"), "../../../");
/// ```
#[must_use]
pub fn depth_prefix(content_path: &str) -> String {
    let separators = content_path.matches('/').count();
    "../".repeat(separators + 1)
}
