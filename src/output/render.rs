use crate::html_doc::HtmlNode;
use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use log::{error, trace};
use markup5ever_rcdom::NodeData;
use std::io;

/// The text the HTML5 parser implies in front of a bare fragment, as it renders.
pub const ENVELOPE_PREFIX: &str = "<html><head></head><body>";

/// The text the HTML5 parser implies after a bare fragment, as it renders.
pub const ENVELOPE_SUFFIX: &str = "</body></html>";

/// Renders a node and all of its descendants to HTML.
///
/// Elements render as their full outer HTML, with attributes in source order. A document node renders as its
/// children, one after the other. A `<template>` renders with its content, as though that content were its children.
pub fn render_node(node: &HtmlNode) -> String {
    let mut out = Vec::with_capacity(256); // just a guess
    if let Err(err) = serialize(&mut out, &Rendered(node), SerializeOpts::default()) {
        // writing to a Vec doesn't fail, so this shouldn't happen
        error!("couldn't render html: {err}");
    }
    String::from_utf8_lossy(&out).into_owned()
}

struct Rendered<'a>(&'a HtmlNode);

impl Serialize for Rendered<'_> {
    fn serialize<S: Serializer>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()> {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(serializer, self.0),
            TraversalScope::ChildrenOnly(_) => write_children(serializer, self.0),
        }
    }
}

fn write_node<S: Serializer>(serializer: &mut S, node: &HtmlNode) -> io::Result<()> {
    match &node.data {
        NodeData::Document => write_children(serializer, node),
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs.borrow();
            serializer.start_elem(name.clone(), attrs.iter().map(|attr| (&attr.name, &*attr.value)))?;
            write_children(serializer, node)?;
            serializer.end_elem(name.clone())
        }
        NodeData::Doctype { name, .. } => serializer.write_doctype(name),
        NodeData::Text { contents } => serializer.write_text(&contents.borrow()),
        NodeData::Comment { contents } => serializer.write_comment(contents),
        NodeData::ProcessingInstruction { target, contents } => {
            serializer.write_processing_instruction(target, contents)
        }
    }
}

fn write_children<S: Serializer>(serializer: &mut S, node: &HtmlNode) -> io::Result<()> {
    if let NodeData::Element { template_contents, .. } = &node.data {
        if let Some(contents) = template_contents.borrow().as_ref() {
            write_children(serializer, contents)?;
        }
    }
    for child in node.children.borrow().iter() {
        write_node(serializer, child)?;
    }
    Ok(())
}

/// Removes [`ENVELOPE_PREFIX`] and [`ENVELOPE_SUFFIX`] from `rendered`, each one only if it's there.
///
/// This is a plain text check. It doesn't look at the tree, so a rendered `<body>` element (which ends in `</body>` but
/// not `</body></html>`) is left alone, as is a full document that has a doctype in front of its `<html>`.
pub fn strip_envelope(rendered: &str) -> &str {
    let mut result = rendered;
    if let Some(stripped) = result.strip_prefix(ENVELOPE_PREFIX) {
        trace!("stripped envelope prefix");
        result = stripped;
    }
    if let Some(stripped) = result.strip_suffix(ENVELOPE_SUFFIX) {
        trace!("stripped envelope suffix");
        result = stripped;
    }
    result
}

/// Renders a node (see [`render_node`]), without the envelope the parser implies around bare fragments.
///
/// For a document parsed from a fragment like `<h1>hi</h1>`, this gives back exactly `<h1>hi</h1>`.
pub fn render_fragment(node: &HtmlNode) -> String {
    let rendered = render_node(node);
    strip_envelope(&rendered).to_string()
}
