use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Write};

/// The in-memory equivalent of a selector string like `h2#intro.foo.bar`.
///
/// Each of the three constraints is independent, and an absent constraint matches anything. A `Query` with no
/// constraints at all (see [`Query::is_empty`]) matches every node, including the document root.
///
/// Build one with [`Query::compile`], or via `From<&str>` / `FromStr`. Compilation never fails.
#[derive(Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Query {
    /// Required tag name, compared case-sensitively against the element's tag.
    pub name: Option<String>,
    /// Required value of the `id` attribute.
    pub id: Option<String>,
    /// Class tokens that must all be present in the `class` attribute.
    pub classes: BTreeSet<String>,
}

impl Query {
    /// Whether this query has no constraints, and thus matches every node.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.id.is_none() && self.classes.is_empty()
    }
}

impl Display for Query {
    /// Writes the query back out as a canonical selector string: name, then id, then classes in sorted order.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        if let Some(id) = &self.id {
            f.write_char('#')?;
            f.write_str(id)?;
        }
        for class in &self.classes {
            f.write_char('.')?;
            f.write_str(class)?;
        }
        Ok(())
    }
}
