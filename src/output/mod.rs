mod render;
mod serializable;

pub use render::*;
pub use serializable::*;
