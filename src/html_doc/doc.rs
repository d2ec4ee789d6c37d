use crate::html_doc::ParseError;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use log::{debug, trace};
use markup5ever_rcdom::{Handle, RcDom};
use std::io::Read;

/// A handle to any node in a parsed [`HtmlDoc`]: the document itself, elements, text, comments, and so on.
pub type HtmlNode = Handle;

/// A fully parsed HTML document.
///
/// Parsing follows the HTML5 algorithm, so fragments get the usual implied `<html>`, `<head>` and `<body>` elements
/// wrapped around them. For example, `<h1>hi</h1>` parses to a tree whose root is a document node containing
/// `<html><head></head><body><h1>hi</h1></body></html>`.
///
/// The tree is read-only once parsed.
pub struct HtmlDoc {
    dom: RcDom,
}

impl HtmlDoc {
    /// Parse some HTML text.
    ///
    /// This never fails: malformed markup is recovered from the same way a browser would.
    pub fn parse(text: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(text);
        Self::from_dom(dom)
    }

    /// Read all of `source`, and parse it as HTML.
    ///
    /// The bytes are decoded as UTF-8, with invalid sequences replaced by U+FFFD. The only failure is being unable to
    /// read `source`.
    pub fn read<R: Read>(mut source: R) -> Result<Self, ParseError> {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut source)?;
        Ok(Self::from_dom(dom))
    }

    fn from_dom(dom: RcDom) -> Self {
        if !dom.errors.is_empty() {
            debug!("recovered from {} html parse error(s)", dom.errors.len());
            for err in &dom.errors {
                trace!("html parse error: {err}");
            }
        }
        Self { dom }
    }

    /// The document node at the root of the tree.
    pub fn root(&self) -> &HtmlNode {
        &self.dom.document
    }
}

impl std::fmt::Debug for HtmlDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDoc")
            .field("errors", &self.dom.errors.len())
            .finish_non_exhaustive()
    }
}
