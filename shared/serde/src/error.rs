use std::{error::Error, fmt};

/// The error returned when a value cannot be read back out of a bit stream:
/// the stream ran dry, or the bits do not describe a valid value of the
/// requested type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SerdeErr;

impl fmt::Display for SerdeErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "malformed or truncated bit stream")
    }
}

impl Error for SerdeErr {}
