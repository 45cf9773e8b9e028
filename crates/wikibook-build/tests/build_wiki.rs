//! End-to-end build tests over a real filesystem layout.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use wikibook_build::{BuildOptions, build};

const TEMPLATE: &str = concat!(
    r#"<html><head><title></title>"#,
    r#"<link rel="stylesheet" href="styles/main.css"></head>"#,
    r#"<body><nav id="pages"></nav><main id="page"></main></body></html>"#
);

/// A wiki source tree: template, content fragments and map file.
struct Wiki {
    _dir: tempfile::TempDir,
    options: BuildOptions,
    content_dir: PathBuf,
}

impl Wiki {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let template_dir = dir.path().join("template");
        fs::create_dir_all(template_dir.join("styles")).unwrap();
        fs::write(template_dir.join("index.html"), TEMPLATE).unwrap();
        fs::write(template_dir.join("styles/main.css"), "body { margin: 0 }").unwrap();
        fs::write(template_dir.join("menu.js"), "// nav toggle").unwrap();

        let content_dir = dir.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();

        let options = BuildOptions {
            map_path: dir.path().join("wikimap.json"),
            target_dir: dir.path().join("dist"),
            template_dir,
        };
        Self {
            _dir: dir,
            options,
            content_dir,
        }
    }

    fn add_content(&self, rel: &str, body: &str) {
        let path = self.content_dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn write_map(&self, categories_json: &str) {
        let map = format!(
            r#"{{
                "title": "Docs",
                "pagesRoot": "{}",
                "categories": {categories_json}
            }}"#,
            self.content_dir.display()
        );
        fs::write(&self.options.map_path, map).unwrap();
    }

    fn output(&self, rel: &str) -> String {
        fs::read_to_string(self.options.target_dir.join(rel)).unwrap()
    }
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| {
                    if e.path().is_dir() {
                        count_files(&e.path())
                    } else {
                        1
                    }
                })
                .sum()
        })
        .unwrap_or(0)
}

#[test]
fn test_page_file_count_matches_map() {
    let wiki = Wiki::new();
    for name in ["a.html", "b.html", "sub/c.html", "sub/deep/d.html"] {
        wiki.add_content(name, "<p>body</p>");
    }
    wiki.write_map(
        r#"[
            {
                "title": "One",
                "pages": [
                    { "title": "A", "contentPath": "a.html" },
                    { "title": "B", "contentPath": "b.html" }
                ]
            },
            {
                "title": "Two",
                "pages": [
                    { "title": "C", "contentPath": "sub/c.html" },
                    { "title": "D", "contentPath": "sub/deep/d.html" }
                ]
            }
        ]"#,
    );

    let report = build(&wiki.options).unwrap();

    assert!(report.success());
    assert_eq!(report.pages_written, 4);
    assert_eq!(count_files(&wiki.options.target_dir.join("pages")), 4);
    assert!(wiki.options.target_dir.join("index.html").exists());
}

#[test]
fn test_every_page_marks_exactly_its_own_entry() {
    let wiki = Wiki::new();
    wiki.add_content("a.html", "<p>a</p>");
    wiki.add_content("b.html", "<p>b</p>");
    wiki.write_map(
        r#"[
            {
                "title": "Guide",
                "pages": [
                    { "title": "A", "contentPath": "a.html" },
                    { "title": "B", "contentPath": "b.html" }
                ]
            }
        ]"#,
    );

    build(&wiki.options).unwrap();

    let a = wiki.output("pages/a.html");
    assert!(a.contains(r#"class="reference sub active" id="wiki-menu-btn-page-0-0""#));
    assert_eq!(a.matches("active").count(), 1);

    let b = wiki.output("pages/b.html");
    assert!(b.contains(r#"class="reference sub active" id="wiki-menu-btn-page-0-1""#));
    assert_eq!(b.matches("active").count(), 1);

    // The index marks nothing.
    assert_eq!(wiki.output("index.html").matches("active").count(), 0);
}

#[test]
fn test_depth_prefix_matches_nesting() {
    let wiki = Wiki::new();
    wiki.add_content("flat.html", "<p>flat</p>");
    wiki.add_content("a/b/deep.html", r#"<a href="pages/flat.html">up</a>"#);
    wiki.write_map(
        r#"[
            {
                "title": "Guide",
                "pages": [
                    { "title": "Flat", "contentPath": "flat.html" },
                    { "title": "Deep", "contentPath": "a/b/deep.html" }
                ]
            }
        ]"#,
    );

    build(&wiki.options).unwrap();

    let flat = wiki.output("pages/flat.html");
    assert!(flat.contains(r#"href="../styles/main.css""#));

    let deep = wiki.output("pages/a/b/deep.html");
    assert!(deep.contains(r#"href="../../../styles/main.css""#));
    // Content link rewritten too: valid from pages/a/b/.
    assert!(deep.contains(r#"<a href="../../../pages/flat.html">up</a>"#));
}

#[test]
fn test_static_assets_copied_without_templates() {
    let wiki = Wiki::new();
    wiki.add_content("a.html", "<p>a</p>");
    wiki.write_map(r#"[{ "title": "G", "pages": [{ "title": "A", "contentPath": "a.html" }] }]"#);

    build(&wiki.options).unwrap();

    assert_eq!(
        wiki.output("styles/main.css"),
        "body { margin: 0 }"
    );
    assert_eq!(wiki.output("menu.js"), "// nav toggle");
    // index.html in the output is the generated one, not the template.
    assert!(wiki.output("index.html").contains("<title>Docs</title>"));
}

#[test]
fn test_missing_content_keeps_index_and_siblings() {
    let wiki = Wiki::new();
    wiki.add_content("present.html", "<p>here</p>");
    wiki.write_map(
        r#"[
            {
                "title": "Guide",
                "pages": [
                    { "title": "Present", "contentPath": "present.html" },
                    { "title": "Absent", "contentPath": "absent.html" }
                ]
            }
        ]"#,
    );

    let report = build(&wiki.options).unwrap();

    assert_eq!(report.pages_written, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].page, "Absent");
    assert!(report.index_written);
    assert!(wiki.output("pages/present.html").contains("<p>here</p>"));
}

#[test]
fn test_double_build_byte_identical_tree() {
    let wiki = Wiki::new();
    wiki.add_content("a.html", "<p>a</p>");
    wiki.add_content("sub/b.html", "<p>b</p>");
    wiki.write_map(
        r#"[
            {
                "title": "Guide",
                "pages": [
                    { "title": "A", "contentPath": "a.html" },
                    { "title": "B", "contentPath": "sub/b.html" }
                ]
            }
        ]"#,
    );

    build(&wiki.options).unwrap();
    let snapshot: Vec<(String, String)> = ["index.html", "pages/a.html", "pages/sub/b.html"]
        .iter()
        .map(|rel| ((*rel).to_owned(), wiki.output(rel)))
        .collect();

    build(&wiki.options).unwrap();
    for (rel, before) in snapshot {
        assert_eq!(wiki.output(&rel), before, "{rel} changed between builds");
    }
}
