mod doc;
mod error;

pub use doc::*;
pub use error::*;
