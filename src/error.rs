use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SetError {
    /// The element cannot be ordered against itself (such as `f64::NAN`).
    InvalidArgument,
    /// `first`/`last` on an empty set, or advancing an exhausted iterator.
    NoSuchElement,
    /// Range views, custom comparators and removal through an iterator.
    Unsupported(&'static str),
    /// Nodes occupy at least level 0.
    InvalidHeight,
    IOError(io::Error),
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SetError::InvalidArgument => f.write_str("element cannot be ordered"),
            SetError::NoSuchElement => f.write_str("no such element"),
            SetError::Unsupported(operation) => write!(f, "{} is not supported", operation),
            SetError::InvalidHeight => f.write_str("node height must be at least 1"),
            SetError::IOError(ref e) => e.fmt(f),
        }
    }
}

impl Error for SetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            SetError::IOError(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SetError {
    fn from(e: io::Error) -> SetError {
        SetError::IOError(e)
    }
}
