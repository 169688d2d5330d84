//! Read-only access to the parsed test log.
//!
//! The extraction pipeline only talks to [`TreeNode`], so it does not care
//! which XML library produced the tree.

pub mod document;

use std::fmt;

/// Namespace of the XML3 report format written by Squish.
pub const SQUISH_XML3_NAMESPACE: &str = "http://www.froglogic.com/resources/schemas/xml3";

/// An element of an already parsed XML tree.
pub trait TreeNode: Sized + Clone {
    /// Local part of the element name.
    fn tag(&self) -> &str;

    fn namespace(&self) -> Option<&str>;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated text of the direct text children.
    fn text(&self) -> String;

    /// Child elements in document order.
    fn elements(&self) -> Vec<Self>;

    /// `namespace` of `None` accepts an element from any namespace.
    fn is(&self, namespace: Option<&str>, tag: &str) -> bool {
        self.tag() == tag && (namespace.is_none() || self.namespace() == namespace)
    }

    fn child(&self, namespace: Option<&str>, tag: &str) -> Option<Self> {
        self.elements().into_iter().find(|e| e.is(namespace, tag))
    }

    /// All elements below this one, pre-order, in document order.
    fn descendants(&self) -> Vec<Self> {
        let mut found = Vec::new();
        let mut stack: Vec<Self> = self.elements().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.elements().into_iter().rev());
            found.push(node);
        }
        found
    }

    fn descendants_named(&self, namespace: Option<&str>, tag: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|e| e.is(namespace, tag))
            .collect()
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    Io(std::io::Error),
    Parse(String),
    Empty,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "cannot read test log: {}", err),
            Error::Parse(err) => write!(f, "test log is not well-formed XML: {}", err),
            Error::Empty => write!(f, "test log has no document element"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
