//! Navigation menu building.
//!
//! The menu is one HTML fragment listing every category as a non-interactive
//! header and every page as a link to its final output location. It is built
//! exactly once per build, cached in the
//! [`BuildContext`](crate::BuildContext), and stamped read-only into the
//! index and every content page.

use std::fmt;
use std::fmt::Write;

use wikibook_map::WikiMap;

use crate::html::escape_html;

/// Deterministic identifier for a menu entry.
///
/// Derived from the page's `(category_index, page_index)` position in the
/// map, which makes it unique across the whole build. The same id is used
/// when building the menu and when locating the entry to mark active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MenuEntryId {
    /// Zero-based category position in the map.
    pub category: usize,
    /// Zero-based page position within the category.
    pub page: usize,
}

impl MenuEntryId {
    /// Create an id from a `(category_index, page_index)` position.
    #[must_use]
    pub fn new(category: usize, page: usize) -> Self {
        Self { category, page }
    }
}

impl fmt::Display for MenuEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wiki-menu-btn-page-{}-{}", self.category, self.page)
    }
}

/// Build the shared navigation menu fragment from a wiki map.
///
/// Categories and pages appear in map order. Page links target the page's
/// final output location (`pages/<contentPath>`), authored relative to the
/// output root; the assembler's depth rewrite makes them valid from nested
/// pages. Output is byte-identical for a fixed map.
#[must_use]
pub fn build_menu(map: &WikiMap) -> String {
    let mut menu = String::new();
    for (category_index, category) in map.categories.iter().enumerate() {
        write!(
            menu,
            r#"<button class="reference">{}</button>"#,
            escape_html(&category.title)
        )
        .unwrap();
        for (page_index, page) in category.pages.iter().enumerate() {
            let id = MenuEntryId::new(category_index, page_index);
            write!(
                menu,
                r#"<a href="pages/{}"><button class="reference sub" id="{id}">{}</button></a>"#,
                page.content_path,
                escape_html(&page.title)
            )
            .unwrap();
        }
    }
    menu
}
