//! String-level HTML transforms used during page assembly.
//!
//! The page template is treated as opaque text: slots are located by element
//! id, and link/stylesheet targets are rewritten with regex-based attribute
//! transforms. No HTML parsing beyond what these operations need.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches the `<title>` element content.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<title[^>]*>)[^<]*(</title>)").unwrap());

/// Matches `href` attributes on `<a>` and `<link>` elements.
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(<(?:a|link)\b[^>]*?\bhref=")([^"]*)""#).unwrap());

/// Escape a string for use in HTML text content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Set the document title, replacing any existing `<title>` content.
///
/// Returns the document unchanged if it has no `<title>` element.
#[must_use]
pub fn set_title(document: &str, title: &str) -> String {
    TITLE_RE
        .replace(document, |caps: &Captures<'_>| {
            format!("{}{}{}", &caps[1], escape_html(title), &caps[2])
        })
        .into_owned()
}

/// Insert a fragment at the start of the element with the given id.
///
/// Returns `None` if no element with that id exists. The fragment is inserted
/// verbatim, directly after the element's opening tag.
#[must_use]
pub fn inject_into_element(document: &str, id: &str, fragment: &str) -> Option<String> {
    let (_, tag_end) = find_tag_by_id(document, id)?;
    let mut out = String::with_capacity(document.len() + fragment.len());
    out.push_str(&document[..=tag_end]);
    out.push_str(fragment);
    out.push_str(&document[tag_end + 1..]);
    Some(out)
}

/// Add a class to the element with the given id.
///
/// Appends to an existing `class` attribute, or adds one if the element has
/// none. Returns `None` if no element with that id exists.
#[must_use]
pub fn add_class(document: &str, id: &str, class: &str) -> Option<String> {
    let (tag_start, tag_end) = find_tag_by_id(document, id)?;
    let tag = &document[tag_start..=tag_end];

    let updated = if let Some(class_pos) = tag.find("class=\"") {
        let insert_at = class_pos + "class=\"".len();
        let close = tag[insert_at..].find('"')? + insert_at;
        format!("{} {}{}", &tag[..close], class, &tag[close..])
    } else {
        // No class attribute: add one before the closing `>`.
        format!("{} class=\"{}\">", &tag[..tag.len() - 1], class)
    };

    let mut out = String::with_capacity(document.len() + class.len() + 1);
    out.push_str(&document[..tag_start]);
    out.push_str(&updated);
    out.push_str(&document[tag_end + 1..]);
    Some(out)
}

/// Prepend a depth prefix to every `<a>`/`<link>` `href` attribute.
///
/// References authored relative to the output root stay valid from the
/// page's nested location. External targets (`http://`, `https://`, `//`,
/// `mailto:`, `tel:`) and in-page fragments (`#…`) are left untouched.
/// An empty prefix leaves the document unchanged.
#[must_use]
pub fn rewrite_relative_refs(document: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return document.to_owned();
    }
    HREF_RE
        .replace_all(document, |caps: &Captures<'_>| {
            let target = &caps[2];
            if is_external(target) {
                caps[0].to_owned()
            } else {
                format!("{}{}{}\"", &caps[1], prefix, target)
            }
        })
        .into_owned()
}

/// True for targets the depth rewrite must not touch.
fn is_external(target: &str) -> bool {
    target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("//")
        || target.starts_with("mailto:")
        || target.starts_with("tel:")
        || target.starts_with('#')
}

/// Locate the opening tag of the element with the given id.
///
/// Returns byte positions of the tag's `<` and `>`.
fn find_tag_by_id(document: &str, id: &str) -> Option<(usize, usize)> {
    let needle = format!("id=\"{id}\"");
    let id_pos = document.find(&needle)?;
    let tag_start = document[..id_pos].rfind('<')?;
    let tag_end = tag_start + document[tag_start..].find('>')?;
    // The id attribute must belong to this tag, not to a later one.
    if id_pos > tag_end {
        return None;
    }
    Some((tag_start, tag_end))
}
