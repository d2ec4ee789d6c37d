//! Extract the first part of an HTML document that matches a simple selector.
//!
//! Selectors are a tag name, an `#id`, and any number of `.class`es, in any combination: `h1`, `a.bar`, `#main`,
//! `li#third.item.last`. There are no combinators, attribute selectors, or pseudo-classes.
//!
//! The document is searched in pre-order (each node before its children, children left to right), and the first node
//! that matches is rendered back to HTML.
//!
//! ```
//! let html = r#"<a class="foo">1</a><a class="bar">2</a><a class="baz">3</a>"#;
//! let found = html_extract::extract_html(html.as_bytes(), "a.bar")?;
//! assert_eq!(found, r#"<a class="bar">2</a>"#);
//! # Ok::<(), html_extract::html_doc::ParseError>(())
//! ```
//!
//! The lower-level pieces are each available on their own:
//!
//! - [`Query`] compiles the selector string
//! - [`html_doc::HtmlDoc`] parses the HTML
//! - [`select::find_first`] searches the tree
//! - [`output::render_fragment`] renders a node without the implied `<html>`/`<body>` wrapper
//!
//! The [`run`] module ties them together the way the CLI does.
use crate::html_doc::{HtmlDoc, ParseError};
use log::debug;
use std::io::Read;

pub mod html_doc;
pub mod output;
mod query;
pub mod run;
pub mod select;

pub use query::*;

/// Reads HTML from `source`, and returns the first element matching `selector`, rendered as HTML.
///
/// If nothing matches, this returns an empty string. An empty selector matches the document itself, so it returns the
/// whole document re-rendered.
///
/// Note that an empty result is ambiguous: it's returned both when nothing matches, and when the match renders as
/// nothing (for example, an empty selector against an empty document). Use [`extract_doc`] to tell them apart.
pub fn extract_html<R: Read>(source: R, selector: &str) -> Result<String, ParseError> {
    let query = Query::compile(selector);
    debug!("compiled selector {selector:?} to {query:?}");
    let doc = HtmlDoc::read(source)?;
    Ok(extract_doc(&doc, &query).unwrap_or_default())
}

/// Like [`extract_html`], but from an in-memory string. This can't fail.
pub fn extract_str(html: &str, selector: &str) -> String {
    let query = Query::compile(selector);
    let doc = HtmlDoc::parse(html);
    extract_doc(&doc, &query).unwrap_or_default()
}

/// Finds and renders the first match for `query` in an already-parsed document, or `None` if nothing matches.
pub fn extract_doc(doc: &HtmlDoc, query: &Query) -> Option<String> {
    select::extract(doc.root(), query)
}
