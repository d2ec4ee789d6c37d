use crate::query::Query;
use std::convert::Infallible;
use std::str::FromStr;

/// Which [`Query`] field the characters currently being read belong to.
///
/// A selector starts in [`SegmentKind::Name`]; each `#` switches to [`SegmentKind::Id`] and each `.` to
/// [`SegmentKind::Class`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    Name,
    Id,
    Class,
}

impl SegmentKind {
    fn from_delimiter(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Self::Id),
            '.' => Some(Self::Class),
            _ => None,
        }
    }
}

/// The scan state: characters read since the last delimiter, and the kind of segment they belong to.
struct Scan {
    query: Query,
    buffer: String,
    kind: SegmentKind,
}

impl Scan {
    fn new(capacity: usize) -> Self {
        Self {
            query: Query::default(),
            buffer: String::with_capacity(capacity),
            kind: SegmentKind::Name,
        }
    }

    /// Moves the buffer into the field for the current segment kind, then switches to `next`.
    ///
    /// An empty buffer is dropped, so a leading `#` or `.` (or two delimiters in a row) sets nothing.
    fn flush(mut self, next: SegmentKind) -> Self {
        let text = std::mem::take(&mut self.buffer);
        if !text.is_empty() {
            match self.kind {
                SegmentKind::Name => self.query.name = Some(text),
                SegmentKind::Id => self.query.id = Some(text),
                SegmentKind::Class => {
                    self.query.classes.insert(text);
                }
            }
        }
        self.kind = next;
        self
    }

    fn push(mut self, ch: char) -> Self {
        self.buffer.push(ch);
        self
    }
}

impl Query {
    /// Compiles a selector string.
    ///
    /// The syntax is an optional tag name followed by any number of `#id` and `.class` segments, in any order:
    ///
    /// ```
    /// # use html_extract::Query;
    /// let query = Query::compile("h2.foo.bar");
    /// assert_eq!(query.name.as_deref(), Some("h2"));
    /// assert_eq!(query.id, None);
    /// assert_eq!(query.classes.len(), 2);
    /// ```
    ///
    /// Everything that isn't `#` or `.` is taken verbatim: there's no escaping, no whitespace trimming, and no check
    /// that tokens are valid identifiers. If a single-valued segment repeats (`#a#b`), the last one wins.
    pub fn compile(selector: &str) -> Self {
        let scan = selector.chars().fold(Scan::new(selector.len()), |scan, ch| {
            match SegmentKind::from_delimiter(ch) {
                Some(next) => scan.flush(next),
                None => scan.push(ch),
            }
        });
        scan.flush(SegmentKind::Name).query
    }
}

impl From<&str> for Query {
    fn from(selector: &str) -> Self {
        Self::compile(selector)
    }
}

impl FromStr for Query {
    type Err = Infallible;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        Ok(Self::compile(selector))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn empty() {
        let query = Query::compile("");
        assert!(query.is_empty());
    }

    #[test]
    fn name_only() {
        check("h1", Some("h1"), None, &[]);
    }

    #[test]
    fn name_and_class() {
        check("a.bar", Some("a"), None, &["bar"]);
    }

    #[test]
    fn id_only() {
        check("#b", None, Some("b"), &[]);
    }

    #[test]
    fn name_and_two_classes() {
        check("h2.foo.bar", Some("h2"), None, &["foo", "bar"]);
    }

    #[test]
    fn id_and_class() {
        check("#foo.bar", None, Some("foo"), &["bar"]);
    }

    #[test]
    fn interleaved_segments() {
        check("div.a#main.b", Some("div"), Some("main"), &["a", "b"]);
        check(".a.b#main", None, Some("main"), &["a", "b"]);
    }

    #[test]
    fn duplicate_classes_collapse() {
        check("p.x.x.y", Some("p"), None, &["x", "y"]);
    }

    #[test]
    fn repeated_id_last_wins() {
        check("#first#second", None, Some("second"), &[]);
    }

    #[test]
    fn bare_delimiters_set_nothing() {
        assert!(Query::compile("#").is_empty());
        assert!(Query::compile(".").is_empty());
        assert!(Query::compile("#..#").is_empty());
        check("a..b", Some("a"), None, &["b"]);
    }

    #[test]
    fn characters_taken_verbatim() {
        check(" h1 . x y", Some(" h1 "), None, &[" x y"]);
        check("ünï#çødé", Some("ünï"), Some("çødé"), &[]);
    }

    #[test]
    fn from_str_and_from() {
        let parsed: Query = "a#b.c".parse().unwrap();
        assert_eq!(parsed, Query::from("a#b.c"));
        assert_eq!(parsed.to_string(), "a#b.c");
    }

    #[test]
    fn segments_in_any_order_compile_the_same() {
        let orders = ["span#x.one.two", "span.one#x.two", "span.two.one#x"];
        let expected = Query::compile(orders[0]);
        for selector in orders {
            assert_eq!(Query::compile(selector), expected, "selector: {selector:?}");
        }
    }

    fn check(selector: &str, name: Option<&str>, id: Option<&str>, classes: &[&str]) {
        let query = Query::compile(selector);
        let expect = Query {
            name: name.map(str::to_string),
            id: id.map(str::to_string),
            classes: classes.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        };
        assert_eq!(query, expect, "selector: {selector:?}");
    }
}
