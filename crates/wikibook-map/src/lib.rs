//! Wiki map data model and loading.
//!
//! A wiki map is a JSON document describing the wiki structure: a title,
//! a directory of content fragments, an optional resources directory and
//! an ordered list of categories, each holding an ordered list of pages.
//!
//! The map is loaded once per build via [`WikiMap::load`] and is read-only
//! from then on. Category and page order is significant: it defines the
//! navigation menu order and is preserved from input to output.
//!
//! # Example
//!
//! ```
//! use wikibook_map::WikiMap;
//!
//! let map: WikiMap = serde_json::from_str(
//!     r#"{
//!         "title": "Docs",
//!         "pagesRoot": "content",
//!         "categories": [
//!             {
//!                 "title": "Guide",
//!                 "pages": [{ "title": "Intro", "contentPath": "intro.html" }]
//!             }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(map.categories[0].pages[0].content_path, "intro.html");
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Error returned when a wiki map cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Map file could not be read.
    #[error("failed to read map {}: {source}", .path.display())]
    Read {
        /// Path to the map file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Map file is not valid JSON or does not match the schema.
    #[error("malformed map {}: {source}", .path.display())]
    Malformed {
        /// Path to the map file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Two pages in the map share the same content path.
    ///
    /// Duplicate content paths would make both pages target the same output
    /// file, silently overwriting one of them, so the map is rejected.
    #[error("duplicate content path \"{content_path}\" (category \"{category}\")")]
    DuplicateContentPath {
        /// The colliding content path.
        content_path: String,
        /// Title of the category holding the second occurrence.
        category: String,
    },
}

/// One wiki page: a display title and the location of its content fragment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPage {
    /// Display title shown in the menu and the document title.
    pub title: String,
    /// Path to the content fragment, relative to the pages root.
    ///
    /// The same relative path is reused under the output `pages/` directory,
    /// so it also determines where the generated page lands.
    pub content_path: String,
}

/// An ordered group of pages under a common header.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiCategory {
    /// Category header shown in the menu (not a link).
    pub title: String,
    /// Pages in menu order.
    pub pages: Vec<WikiPage>,
}

/// The wiki map: full structural description of one wiki.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiMap {
    /// Wiki title, used as the index page title and as the suffix of every
    /// content page title.
    pub title: String,
    /// Directory containing all content fragments.
    pub pages_root: PathBuf,
    /// Optional directory of custom resources copied verbatim into the
    /// output's `resources/` directory. Absent means no resource copy.
    #[serde(default)]
    pub resources_root: Option<PathBuf>,
    /// Categories in menu order.
    pub categories: Vec<WikiCategory>,
}

impl WikiMap {
    /// Load and validate a wiki map from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Read`] if the file cannot be read,
    /// [`MapError::Malformed`] if it is not valid JSON matching the schema,
    /// and [`MapError::DuplicateContentPath`] if two pages share a content
    /// path.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let map: Self = serde_json::from_str(&text).map_err(|source| MapError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        map.validate()?;
        Ok(map)
    }

    /// Validate structural invariants of the map.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DuplicateContentPath`] if two pages (in any
    /// categories) share the same content path.
    pub fn validate(&self) -> Result<(), MapError> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            for page in &category.pages {
                if !seen.insert(page.content_path.as_str()) {
                    return Err(MapError::DuplicateContentPath {
                        content_path: page.content_path.clone(),
                        category: category.title.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Total number of pages across all categories.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.categories.iter().map(|c| c.pages.len()).sum()
    }

    /// Iterate all pages with their `(category_index, page_index)` position.
    ///
    /// Yields pages in menu order: categories in map order, pages in
    /// category order.
    pub fn indexed_pages(
        &self,
    ) -> impl Iterator<Item = (usize, usize, &WikiCategory, &WikiPage)> {
        self.categories
            .iter()
            .enumerate()
            .flat_map(|(category_index, category)| {
                category
                    .pages
                    .iter()
                    .enumerate()
                    .map(move |(page_index, page)| (category_index, page_index, category, page))
            })
    }
}
