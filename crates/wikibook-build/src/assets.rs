//! Static asset and resource copying.
//!
//! Two filesystem collaborators of the build: copying the template's
//! non-template files (everything except `.html`) into the output root, and
//! copying an optional resources tree into `resources/`. Both are full
//! overwrite copies; a build is always a complete regeneration.

use std::path::{Path, PathBuf};

use crate::template::PageTemplate;

/// Copy a template's static assets into the target directory.
///
/// Copies every non-`.html` file under the template directory, preserving
/// relative paths. Template documents themselves are never copied.
///
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns the first I/O error encountered while walking or copying.
pub fn copy_static_assets(template: &PageTemplate, target: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for rel in walk_files(template.dir())? {
        if rel.extension().is_some_and(|ext| ext == "html") {
            continue;
        }
        copy_file(&template.dir().join(&rel), &target.join(&rel))?;
        copied += 1;
    }
    Ok(copied)
}

/// Recursively copy a directory tree, overwriting existing files.
///
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns the first I/O error encountered while walking or copying.
pub fn copy_tree(source: &Path, target: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for rel in walk_files(source)? {
        copy_file(&source.join(&rel), &target.join(&rel))?;
        copied += 1;
    }
    Ok(copied)
}

/// Copy a single file, creating missing parent directories.
fn copy_file(source: &Path, target: &Path) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(source, target)?;
    Ok(())
}

/// Collect file paths under `base`, relative to `base`, in sorted order.
///
/// Sorted output keeps copy order (and any error surfaced) deterministic.
fn walk_files(base: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    walk_files_inner(base, base, &mut result)?;
    result.sort();
    Ok(result)
}

fn walk_files_inner(base: &Path, dir: &Path, result: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_files_inner(base, &path, result)?;
        } else if let Ok(rel) = path.strip_prefix(base) {
            result.push(rel.to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_copy_static_assets_skips_html() {
        let dir = tempfile::tempdir().unwrap();
        let template_dir = dir.path().join("template");
        fs::create_dir_all(template_dir.join("styles")).unwrap();
        fs::write(
            template_dir.join("index.html"),
            r#"<title></title><nav id="pages"></nav><main id="page"></main>"#,
        )
        .unwrap();
        fs::write(template_dir.join("styles/main.css"), "body {}").unwrap();
        fs::write(template_dir.join("favicon.ico"), [0u8; 4]).unwrap();

        let template = PageTemplate::load(&template_dir).unwrap();
        let target = dir.path().join("out");
        let copied = copy_static_assets(&template, &target).unwrap();

        assert_eq!(copied, 2);
        assert!(target.join("styles/main.css").exists());
        assert!(target.join("favicon.ico").exists());
        assert!(!target.join("index.html").exists());
    }

    #[test]
    fn test_copy_tree_preserves_structure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("resources");
        fs::create_dir_all(source.join("img/icons")).unwrap();
        fs::write(source.join("img/logo.png"), [1u8; 4]).unwrap();
        fs::write(source.join("img/icons/star.svg"), "<svg/>").unwrap();

        let target = dir.path().join("out/resources");
        let copied = copy_tree(&source, &target).unwrap();

        assert_eq!(copied, 2);
        assert!(target.join("img/logo.png").exists());
        assert!(target.join("img/icons/star.svg").exists());
    }

    #[test]
    fn test_copy_tree_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("resources");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("data.txt"), "new").unwrap();

        let target = dir.path().join("out");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("data.txt"), "old").unwrap();

        copy_tree(&source, &target).unwrap();
        assert_eq!(fs::read_to_string(target.join("data.txt")).unwrap(), "new");
    }

    #[test]
    fn test_copy_tree_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_tree(&dir.path().join("missing"), &dir.path().join("out"));
        assert!(result.is_err());
    }
}
