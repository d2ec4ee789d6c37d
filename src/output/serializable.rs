use crate::query::Query;
use serde::Serialize;

/// A serializable view of one extraction: the selector as given, the query it compiled to, and the matched HTML.
///
/// `html` is `None` when nothing matched. Unlike the plain-string result of
/// [`extract_html`][crate::extract_html], that's distinct from a match that renders as an empty string.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SerializableMatch<'a> {
    selector: &'a str,
    query: &'a Query,
    html: Option<&'a str>,
}

impl<'a> SerializableMatch<'a> {
    pub fn new(selector: &'a str, query: &'a Query, html: Option<&'a str>) -> Self {
        Self { selector, query, html }
    }
}
