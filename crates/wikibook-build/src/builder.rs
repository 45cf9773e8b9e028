//! Build orchestration.
//!
//! Drives one full wiki build: load the map, build the menu once, assemble
//! and write the index and every content page, then copy static assets and
//! resources. The per-page stage fans out over the rayon thread pool — each
//! task reads only the shared, immutable [`BuildContext`] and writes a
//! distinct output path, so no locking is needed.
//!
//! Failures are page-attributed: one page's missing content or failed write
//! is collected in the [`BuildReport`] while the rest of the build proceeds.
//! Only load-stage failures (map, template) abort the build outright.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use wikibook_map::{MapError, WikiCategory, WikiMap, WikiPage};

use crate::assemble::{AssembleError, PageAssembler, PageInput};
use crate::assets;
use crate::depth::depth_prefix;
use crate::menu::{MenuEntryId, build_menu};
use crate::template::{PageTemplate, TemplateError};
use crate::writer::{WriteError, write_page};

/// Inputs of one build invocation.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Path to the wiki map JSON file.
    pub map_path: PathBuf,
    /// Output directory; the build is a full regeneration into it.
    pub target_dir: PathBuf,
    /// Template directory with the base page and static assets.
    pub template_dir: PathBuf,
}

/// Fatal build error: nothing useful could be produced.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Wiki map could not be loaded.
    #[error(transparent)]
    Map(#[from] MapError),
    /// Template directory is unusable.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Static assets could not be copied into the target.
    #[error("failed to copy static assets: {0}")]
    StaticCopy(#[source] std::io::Error),
    /// Resources tree could not be copied into the target.
    #[error("failed to copy resources from {}: {source}", .path.display())]
    Resources {
        /// Configured resources root.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Error that failed one page without stopping the build.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Content fragment missing or unreadable.
    #[error("failed to read content {}: {source}", .path.display())]
    Content {
        /// Path the content was expected at.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Page document could not be assembled.
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    /// Page could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// One page that failed, with enough context to locate its map entry.
#[derive(Debug)]
pub struct PageFailure {
    /// Page title from the map ("index" for the index page).
    pub page: String,
    /// The page's content path ("index.html" for the index page).
    pub content_path: String,
    /// Category title; `None` for the index page.
    pub category: Option<String>,
    /// What went wrong.
    pub error: PageError,
}

/// Outcome of one build: successes, warnings and page-attributed failures.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Content pages written (the index is reported separately).
    pub pages_written: usize,
    /// Whether the index page was written.
    pub index_written: bool,
    /// Non-fatal warnings (e.g. active-entry lookup misses).
    pub warnings: Vec<String>,
    /// Pages that produced no output.
    pub failures: Vec<PageFailure>,
}

impl BuildReport {
    /// True when every page (and the index) was produced.
    #[must_use]
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Shared, immutable state of one build.
///
/// Created once after the load stage and passed by reference to every
/// component; the menu is computed exactly once here and never mutated.
#[derive(Debug)]
pub struct BuildContext {
    /// The resolved wiki map.
    pub map: WikiMap,
    /// The cached menu fragment, shared read-only by every assembly.
    pub menu: String,
    /// The loaded page template.
    pub template: PageTemplate,
    /// Output directory.
    pub target_dir: PathBuf,
}

impl BuildContext {
    /// Build the context for a loaded map and template, computing the menu.
    #[must_use]
    pub fn new(map: WikiMap, template: PageTemplate, target_dir: PathBuf) -> Self {
        let menu = build_menu(&map);
        Self {
            map,
            menu,
            template,
            target_dir,
        }
    }

    fn assembler(&self) -> PageAssembler<'_> {
        PageAssembler::new(self.template.base(), &self.menu, &self.map.title)
    }
}

/// Run one full build.
///
/// Stages: load, menu build, index assembly, per-page fan-out, static/
/// resource copy. Per-page failures end up in the report; the returned
/// `Err` is reserved for failures that invalidate the whole build.
///
/// # Errors
///
/// Returns [`BuildError`] if the map or template cannot be loaded, or if
/// static asset / resource copying fails.
pub fn build(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let map = WikiMap::load(&options.map_path)?;
    let template = PageTemplate::load(&options.template_dir)?;
    let ctx = BuildContext::new(map, template, options.target_dir.clone());
    run(&ctx)
}

/// Run the post-load stages against a prepared context.
///
/// # Errors
///
/// Returns [`BuildError`] if static asset or resource copying fails.
pub fn run(ctx: &BuildContext) -> Result<BuildReport, BuildError> {
    let mut report = BuildReport::default();
    let assembler = ctx.assembler();

    // Index page: map title only, no content, no depth rewrite.
    match build_index(ctx, &assembler) {
        Ok(()) => report.index_written = true,
        Err(error) => report.failures.push(PageFailure {
            page: "index".to_owned(),
            content_path: "index.html".to_owned(),
            category: None,
            error,
        }),
    }

    // Per-page fan-out: tasks share only the immutable context and write
    // disjoint paths.
    let outcomes: Vec<_> = ctx
        .map
        .indexed_pages()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(category_index, page_index, category, page)| {
            let result = build_page(ctx, &assembler, category_index, page_index, category, page);
            (category, page, result)
        })
        .collect();

    for (category, page, result) in outcomes {
        match result {
            Ok(warning) => {
                report.pages_written += 1;
                report.warnings.extend(warning);
            }
            Err(error) => {
                tracing::warn!(
                    page = %page.title,
                    content_path = %page.content_path,
                    category = %category.title,
                    error = %error,
                    "page failed"
                );
                report.failures.push(PageFailure {
                    page: page.title.clone(),
                    content_path: page.content_path.clone(),
                    category: Some(category.title.clone()),
                    error,
                });
            }
        }
    }

    // Static assets and resources land in subtrees disjoint from pages/.
    assets::copy_static_assets(&ctx.template, &ctx.target_dir).map_err(BuildError::StaticCopy)?;

    if let Some(resources) = &ctx.map.resources_root {
        assets::copy_tree(resources, &ctx.target_dir.join("resources")).map_err(|source| {
            BuildError::Resources {
                path: resources.clone(),
                source,
            }
        })?;
    }

    tracing::debug!(
        pages = report.pages_written,
        failures = report.failures.len(),
        "build finished"
    );
    Ok(report)
}

/// Assemble and write the index page.
fn build_index(ctx: &BuildContext, assembler: &PageAssembler<'_>) -> Result<(), PageError> {
    let index = assembler.assemble_index(ctx.target_dir.join("index.html"))?;
    write_page(&index)?;
    Ok(())
}

/// Assemble and write one content page; returns its warning, if any.
fn build_page(
    ctx: &BuildContext,
    assembler: &PageAssembler<'_>,
    category_index: usize,
    page_index: usize,
    category: &WikiCategory,
    page: &WikiPage,
) -> Result<Option<String>, PageError> {
    let content_path = ctx.map.pages_root.join(&page.content_path);
    let content = std::fs::read_to_string(&content_path).map_err(|source| PageError::Content {
        path: content_path,
        source,
    })?;

    let prefix = depth_prefix(&page.content_path);
    let input = PageInput {
        page_title: &page.title,
        category_title: &category.title,
        content: &content,
        entry_id: MenuEntryId::new(category_index, page_index),
        depth_prefix: &prefix,
    };
    let target = output_path(&ctx.target_dir, &page.content_path);
    let (assembled, warning) = assembler.assemble_page(&input, target)?;
    write_page(&assembled)?;
    tracing::debug!(page = %page.title, target = %assembled.target.display(), "page written");
    Ok(warning)
}

/// Final output location for a content path: `<target>/pages/<contentPath>`.
fn output_path(target_dir: &Path, content_path: &str) -> PathBuf {
    let mut path = target_dir.join("pages");
    path.extend(content_path.split('/'));
    path
}
