use crate::xml::{Error, TreeNode};
use std::fs;
use std::path::Path;
use sxd_document::dom::{ChildOfElement, ChildOfRoot, Document, Element};
use sxd_document::{parser, Package};

impl<'d> TreeNode for Element<'d> {
    fn tag(&self) -> &str {
        self.name().local_part()
    }

    fn namespace(&self) -> Option<&str> {
        self.name().namespace_uri()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attribute_value(name)
    }

    fn text(&self) -> String {
        Element::children(self)
            .into_iter()
            .filter_map(|child| match child {
                ChildOfElement::Text(text) => Some(text.text()),
                _ => None,
            })
            .collect()
    }

    fn elements(&self) -> Vec<Self> {
        Element::children(self)
            .into_iter()
            .filter_map(|child| match child {
                ChildOfElement::Element(element) => Some(element),
                _ => None,
            })
            .collect()
    }
}

pub fn parse(xml: &str) -> Result<Package, Error> {
    parser::parse(xml).map_err(|err| Error::Parse(format!("{:?}", err)))
}

pub fn load(path: &Path) -> Result<Package, Error> {
    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    parse(&content)
}

pub fn root_element<'d>(document: &Document<'d>) -> Result<Element<'d>, Error> {
    document
        .root()
        .children()
        .into_iter()
        .find_map(|child| match child {
            ChildOfRoot::Element(element) => Some(element),
            _ => None,
        })
        .ok_or(Error::Empty)
}
