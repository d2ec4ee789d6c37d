use crate::query::Query;
use markup5ever_rcdom::{Node, NodeData};

/// Attribute keys are matched in their exact lower-case spelling or all-caps, and in no other casing.
fn is_key(key: &str, lower: &str, upper: &str) -> bool {
    key == lower || key == upper
}

impl Query {
    /// Whether `node` satisfies every constraint of this query.
    ///
    /// Only elements have a tag name or attributes, so a query with any constraint can only match an element. An
    /// empty query matches every node, whatever its type.
    pub fn matches(&self, node: &Node) -> bool {
        match &node.data {
            NodeData::Element { name, attrs, .. } => {
                let attrs = attrs.borrow();
                let pairs = attrs.iter().map(|attr| (&*attr.name.local, &*attr.value));
                self.matches_element(&name.local, pairs)
            }
            _ => self.is_empty(),
        }
    }

    pub(crate) fn matches_element<'a, A>(&self, tag: &str, attrs: A) -> bool
    where
        A: IntoIterator<Item = (&'a str, &'a str)> + Clone,
    {
        self.matches_name(tag) && self.matches_id(attrs.clone()) && self.matches_classes(attrs)
    }

    fn matches_name(&self, tag: &str) -> bool {
        match &self.name {
            None => true,
            Some(name) => name == tag,
        }
    }

    fn matches_id<'a>(&self, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> bool {
        let Some(id) = &self.id else {
            return true;
        };
        attrs
            .into_iter()
            .any(|(key, value)| is_key(key, "id", "ID") && value == id)
    }

    fn matches_classes<'a>(&self, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> bool {
        if self.classes.is_empty() {
            return true;
        }
        attrs.into_iter().any(|(key, value)| {
            if !is_key(key, "class", "CLASS") {
                return false;
            }
            // Split on single spaces only: runs of spaces produce empty tokens, which no required class equals.
            let tokens: Vec<&str> = value.split(' ').collect();
            self.classes.iter().all(|class| tokens.contains(&class.as_str()))
        })
    }
}
