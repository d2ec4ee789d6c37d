use crate::html_doc::HtmlNode;
use crate::output::render_fragment;
use crate::query::Query;
use log::{debug, trace};
use markup5ever_rcdom::NodeData;

/// Finds the first node under (and including) `root` that matches the query.
///
/// "First" means first in pre-order: a node is tested before its children, and children are searched left to right,
/// each one fully before its next sibling. The search stops at the first match, so the result isn't necessarily the
/// shallowest match in the tree. A node that matches is returned whole; its descendants aren't searched.
pub fn find_first(root: &HtmlNode, query: &Query) -> Option<HtmlNode> {
    let mut search = Search { query, visited: 0 };
    let found = search.visit(root);
    match &found {
        Some(_) => debug!("query {query:?} matched after visiting {} node(s)", search.visited),
        None => debug!("query {query:?} matched nothing in {} node(s)", search.visited),
    }
    found
}

/// Finds the first match (as [`find_first`] does), and renders it to HTML.
///
/// The rendered text has no implied `<html><head></head><body>` wrapper; see [`render_fragment`].
pub fn extract(root: &HtmlNode, query: &Query) -> Option<String> {
    find_first(root, query).map(|node| render_fragment(&node))
}

struct Search<'q> {
    query: &'q Query,
    visited: usize,
}

impl Search<'_> {
    fn visit(&mut self, node: &HtmlNode) -> Option<HtmlNode> {
        self.visited += 1;
        if self.query.matches(node) {
            trace!("match at node #{}", self.visited);
            return Some(node.clone());
        }
        if let Some(found) = self.visit_template_contents(node) {
            return Some(found);
        }
        node.children.borrow().iter().find_map(|child| self.visit(child))
    }

    /// A `<template>` keeps its parsed content in a separate fragment rather than as children. That fragment's
    /// children are searched as if they were the template's own, ahead of any regular children.
    fn visit_template_contents(&mut self, node: &HtmlNode) -> Option<HtmlNode> {
        let NodeData::Element { template_contents, .. } = &node.data else {
            return None;
        };
        let contents = template_contents.borrow().clone()?;
        let found = contents.children.borrow().iter().find_map(|child| self.visit(child));
        found
    }
}
