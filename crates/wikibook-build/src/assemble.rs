//! Page assembly.
//!
//! Turns the empty base template into one fully formed output page: title
//! set, shared menu injected, content injected, relative references rewritten
//! for the page's nesting depth, and the page's own menu entry marked active.
//!
//! Each assembly starts from a fresh copy of the template and the cached menu
//! fragment; shared inputs are never mutated, which keeps concurrent
//! assemblies independent.

use std::path::PathBuf;

use crate::html;
use crate::menu::MenuEntryId;
use crate::template::{CONTENT_SLOT_ID, MENU_SLOT_ID};

/// Class added to the menu entry of the page being rendered.
const ACTIVE_CLASS: &str = "active";

/// A fully assembled page bound to its output path.
///
/// Owned by the assembler until handed to the writer, after which it is
/// written verbatim and discarded.
#[derive(Debug)]
pub struct AssembledPage {
    /// Serialized document.
    pub html: String,
    /// Final output location.
    pub target: PathBuf,
}

/// Error returned when a page cannot be assembled.
///
/// [`PageTemplate::load`](crate::PageTemplate::load) validates both slots up
/// front, so these only fire if an injected fragment corrupts a slot marker.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// A required insertion point disappeared from the document.
    #[error("no element with id \"{0}\" in page document")]
    MissingSlot(&'static str),
}

/// Everything needed to assemble one content page.
#[derive(Debug)]
pub struct PageInput<'a> {
    /// Page title (first element of the title chain).
    pub page_title: &'a str,
    /// Title of the page's category.
    pub category_title: &'a str,
    /// Raw content fragment, inserted verbatim.
    pub content: &'a str,
    /// The page's menu entry id, for active marking.
    pub entry_id: MenuEntryId,
    /// Depth prefix from the path depth resolver.
    pub depth_prefix: &'a str,
}

/// Assembles pages from a base template and the cached menu fragment.
///
/// Holds only shared, read-only inputs; one assembler serves the index and
/// every content page of a build, from any number of threads.
#[derive(Clone, Copy, Debug)]
pub struct PageAssembler<'a> {
    template: &'a str,
    menu: &'a str,
    map_title: &'a str,
}

impl<'a> PageAssembler<'a> {
    /// Create an assembler over the base template and cached menu.
    #[must_use]
    pub fn new(template: &'a str, menu: &'a str, map_title: &'a str) -> Self {
        Self {
            template,
            menu,
            map_title,
        }
    }

    /// Assemble the index page: map title, menu, no content.
    ///
    /// The index sits at the output root, so its references need no depth
    /// rewrite and no menu entry is marked active.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::MissingSlot`] if the menu slot is absent.
    pub fn assemble_index(&self, target: PathBuf) -> Result<AssembledPage, AssembleError> {
        let document = html::set_title(self.template, self.map_title);
        let document = html::inject_into_element(&document, MENU_SLOT_ID, self.menu)
            .ok_or(AssembleError::MissingSlot(MENU_SLOT_ID))?;
        Ok(AssembledPage {
            html: document,
            target,
        })
    }

    /// Assemble one content page.
    ///
    /// Follows the assembly contract: title chain, menu injection, verbatim
    /// content injection, depth rewrite over every reference (including the
    /// ones just injected), then active marking. Returns the page plus an
    /// optional warning when the page's menu entry could not be found (a
    /// map/menu mismatch; the page is still produced).
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::MissingSlot`] if an insertion point is
    /// absent from the document.
    pub fn assemble_page(
        &self,
        input: &PageInput<'_>,
        target: PathBuf,
    ) -> Result<(AssembledPage, Option<String>), AssembleError> {
        let title = format!(
            "{} - {} - {}",
            input.page_title, input.category_title, self.map_title
        );
        let document = html::set_title(self.template, &title);
        let document = html::inject_into_element(&document, MENU_SLOT_ID, self.menu)
            .ok_or(AssembleError::MissingSlot(MENU_SLOT_ID))?;
        let document = html::inject_into_element(&document, CONTENT_SLOT_ID, input.content)
            .ok_or(AssembleError::MissingSlot(CONTENT_SLOT_ID))?;

        // Rewrite after injection so menu and content references, authored
        // relative to the output root, are covered too.
        let document = html::rewrite_relative_refs(&document, input.depth_prefix);

        let entry_id = input.entry_id.to_string();
        let (document, warning) = match html::add_class(&document, &entry_id, ACTIVE_CLASS) {
            Some(document) => (document, None),
            None => {
                let warning = format!(
                    "menu entry {entry_id} not found for page \"{}\"",
                    input.page_title
                );
                tracing::warn!(page = input.page_title, entry_id = %entry_id, "menu entry not found");
                (document, Some(warning))
            }
        };

        Ok((
            AssembledPage {
                html: document,
                target,
            },
            warning,
        ))
    }
}
