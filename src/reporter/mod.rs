pub mod chart;
pub mod serialize;
pub mod workbook;

use crate::report::Report;
use std::fmt;
use std::path::Path;

pub use self::workbook::CsvWorkbook;

/// Turns a finished report into files below `destination`.
pub trait Renderer {
    fn render(&self, report: &Report, destination: &Path) -> Result<(), Error>;
}

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Json(err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "cannot write report: {}", err),
            Error::Csv(err) => write!(f, "cannot write report sheet: {}", err),
            Error::Json(err) => write!(f, "cannot serialize report: {}", err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
