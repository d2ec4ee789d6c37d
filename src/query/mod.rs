mod compile;
mod query;

pub use compile::SegmentKind;
pub use query::Query;
