//! Static wiki page generation.
//!
//! Converts a declarative wiki map (categories and pages, content stored in
//! standalone fragments) into a fully static, browsable set of HTML
//! documents: one index page plus one output page per source page.
//!
//! # Architecture
//!
//! The pipeline runs in five stages, driven by [`builder::build`]:
//!
//! 1. **Load** — parse the [`WikiMap`](wikibook_map::WikiMap) and the page
//!    template; both are read-only afterwards.
//! 2. **Menu build** — [`menu::build_menu`] runs exactly once; the fragment
//!    is cached in the [`BuildContext`] and shared by every page.
//! 3. **Index assembly** — [`PageAssembler::assemble_index`].
//! 4. **Page fan-out** — one rayon task per page: resolve the depth prefix,
//!    assemble, write atomically. Tasks share only immutable state and write
//!    disjoint paths.
//! 5. **Static copy** — template assets into the output root, the optional
//!    resources tree into `resources/`.
//!
//! Per-page failures are collected in the [`BuildReport`] instead of
//! aborting the build; only load-stage errors are fatal.

mod assemble;
mod assets;
mod builder;
mod depth;
mod html;
mod menu;
mod template;
mod writer;

pub use assemble::{AssembleError, AssembledPage, PageAssembler, PageInput};
pub use assets::{copy_static_assets, copy_tree};
pub use builder::{BuildContext, BuildError, BuildOptions, BuildReport, PageError, PageFailure, build, run};
pub use depth::depth_prefix;
pub use html::escape_html;
pub use menu::{MenuEntryId, build_menu};
pub use template::{CONTENT_SLOT_ID, MENU_SLOT_ID, PageTemplate, TemplateError};
pub use writer::{WriteError, write_page};
