use std::fmt::{Display, Formatter};
use std::io;

/// The input couldn't be read as HTML.
///
/// The HTML parser itself recovers from any malformed markup the way browsers do, so this only comes up when the
/// input can't be read at all. Bytes that aren't valid UTF-8 are replaced while decoding, so only I/O failures end
/// up here.
#[derive(Debug)]
pub struct ParseError {
    cause: io::Error,
}

impl ParseError {
    pub(crate) fn new(cause: io::Error) -> Self {
        Self { cause }
    }

    /// The underlying read failure.
    pub fn cause(&self) -> &io::Error {
        &self.cause
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse html error: {}", self.cause)
    }
}

impl From<io::Error> for ParseError {
    fn from(cause: io::Error) -> Self {
        Self::new(cause)
    }
}
