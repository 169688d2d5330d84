use crate::time;
use std::fmt;

/// Where in the test log a failing unit sits.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeContext {
    /// Position path such as `testcase[2]/section[1]`, 1-based.
    pub position: String,
    pub name: Option<String>,
}

impl fmt::Display for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ('{}')", self.position, name),
            None => f.write_str(&self.position),
        }
    }
}

/// Any of these aborts the whole run: no partial report is produced.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    MalformedTimestamp {
        node: NodeContext,
        marker: &'static str,
        source: time::error::Error,
    },
    MalformedTestNode {
        node: NodeContext,
        missing: &'static str,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedTimestamp { source, .. } => Some(source),
            Error::MalformedTestNode { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedTimestamp {
                node,
                marker,
                source,
            } => write!(f, "malformed {} timestamp in test {}: {}", marker, node, source),
            Error::MalformedTestNode { node, missing } => {
                write!(f, "malformed test {}: missing {}", node, missing)
            }
        }
    }
}
