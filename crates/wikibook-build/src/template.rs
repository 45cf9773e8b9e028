//! Page template loading.
//!
//! The template collaborator is a prebuilt directory containing one base
//! page document (`index.html`) with known slot identifiers, plus static
//! assets (stylesheets, scripts, fonts) copied verbatim into every build's
//! output root. Stylesheet compilation happens before the build and is not
//! part of this crate; the template directory already holds the final CSS.

use std::path::{Path, PathBuf};

/// Element id of the menu insertion point in the base template.
pub const MENU_SLOT_ID: &str = "pages";

/// Element id of the content insertion point in the base template.
pub const CONTENT_SLOT_ID: &str = "page";

/// Base template filename inside the template directory.
const TEMPLATE_FILENAME: &str = "index.html";

/// Error returned when the template directory is unusable.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Base template file could not be read.
    #[error("failed to read template {}: {source}", .path.display())]
    Read {
        /// Path to the base template.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Base template is missing a required insertion point.
    #[error("template {} has no element with id \"{id}\"", .path.display())]
    MissingSlot {
        /// Path to the base template.
        path: PathBuf,
        /// The missing slot id.
        id: &'static str,
    },
}

/// A loaded page template: the base document plus its directory.
///
/// The base document is read once and validated to contain both insertion
/// points, so page assembly never discovers a broken template mid-build.
#[derive(Clone, Debug)]
pub struct PageTemplate {
    dir: PathBuf,
    base: String,
}

impl PageTemplate {
    /// Load the base template from a template directory and validate its
    /// insertion points.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] if `index.html` cannot be read, and
    /// [`TemplateError::MissingSlot`] if a required slot id is absent.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let path = dir.join(TEMPLATE_FILENAME);
        let base = std::fs::read_to_string(&path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;

        for id in [MENU_SLOT_ID, CONTENT_SLOT_ID] {
            if !base.contains(&format!("id=\"{id}\"")) {
                return Err(TemplateError::MissingSlot { path, id });
            }
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            base,
        })
    }

    /// The empty base document every page starts from.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The template directory, for static asset enumeration.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const BASE: &str = r#"<html><head><title></title></head><body><nav id="pages"></nav><main id="page"></main></body></html>"#;

    #[test]
    fn test_load_valid_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), BASE).unwrap();

        let template = PageTemplate::load(dir.path()).unwrap();
        assert_eq!(template.base(), BASE);
        assert_eq!(template.dir(), dir.path());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageTemplate::load(dir.path()).unwrap_err();
        assert!(matches!(err, TemplateError::Read { .. }));
    }

    #[test]
    fn test_load_rejects_missing_menu_slot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("index.html"),
            r#"<html><body><main id="page"></main></body></html>"#,
        )
        .unwrap();

        let err = PageTemplate::load(dir.path()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingSlot { id, .. } if id == MENU_SLOT_ID));
    }

    #[test]
    fn test_load_rejects_missing_content_slot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("index.html"),
            r#"<html><body><nav id="pages"></nav></body></html>"#,
        )
        .unwrap();

        let err = PageTemplate::load(dir.path()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingSlot { id, .. } if id == CONTENT_SLOT_ID));
    }
}
