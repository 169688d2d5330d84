use std::fmt;
use std::iter::repeat;

/// An error that occurred while parsing a report timestamp.
#[derive(Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    Syntax(String),
    OutOfRange(String),
}

impl ::std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Syntax(ref err) => f.write_str(err),
            Error::OutOfRange(ref err) => f.write_str(err),
        }
    }
}

// Both variants carry a full message, so show it framed rather than as a
// quoted string when someone prints the error with `{:?}`.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (kind, err) = match *self {
            Error::Syntax(ref err) => ("Syntax", err),
            Error::OutOfRange(ref err) => ("OutOfRange", err),
        };
        let hr: String = repeat('~').take(79).collect();
        writeln!(f, "{}(", kind)?;
        writeln!(f, "{}", hr)?;
        writeln!(f, "{}", err)?;
        writeln!(f, "{}", hr)?;
        write!(f, ")")
    }
}
