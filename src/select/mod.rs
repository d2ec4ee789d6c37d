mod find;
mod predicate;

pub use find::*;
