use std::collections::HashMap;
use std::collections::hash_map;

use tracing::debug;
use webdav_xml::builder::Element;
use webdav_xml::parser::{Node, XmlDeserialize, child_elements};

use crate::container::{PropContainer, PropContent};
use crate::property::DavProperty;
use crate::property_name::DavPropertyName;
use crate::property_name_set::DavPropertyNameSet;
use crate::{DavError, expect_prop_element};

/// Properties with values keyed by name. Adding a property replaces any
/// property of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DavPropertySet {
    map: HashMap<DavPropertyName, DavProperty>,
}

impl DavPropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every direct child of a `DAV:prop` element as a property.
    pub fn from_prop_element(prop: Node<'_, '_>) -> Result<Self, DavError> {
        expect_prop_element(prop)?;

        let mut set = Self::new();
        for child in child_elements(prop) {
            set.add(DavProperty::from_node(child)?);
        }

        debug!(size = set.len(), "read properties from DAV:prop");
        Ok(set)
    }

    /// Adds `property`, returning the property it replaced.
    pub fn add(&mut self, property: DavProperty) -> Option<DavProperty> {
        self.map.insert(property.name().clone(), property)
    }

    pub fn get(&self, name: &DavPropertyName) -> Option<&DavProperty> {
        self.map.get(name)
    }

    pub fn remove(&mut self, name: &DavPropertyName) -> Option<DavProperty> {
        self.map.remove(name)
    }

    pub fn contains(&self, name: &DavPropertyName) -> bool {
        self.map.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> hash_map::Values<'_, DavPropertyName, DavProperty> {
        self.map.values()
    }

    /// The names of all properties in this set.
    pub fn name_set(&self) -> DavPropertyNameSet {
        self.map.keys().cloned().collect()
    }
}

impl PropContainer for DavPropertySet {
    fn contains(&self, name: &DavPropertyName) -> bool {
        self.map.contains_key(name)
    }

    fn add_content(&mut self, content: PropContent) -> bool {
        match content {
            PropContent::Property(property) => {
                self.add(property);
                true
            }
            other => {
                debug!("DavProperty expected, found: {}", other.kind());
                false
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn content_size(&self) -> usize {
        self.map.len()
    }

    fn property_names(&self) -> impl Iterator<Item = &DavPropertyName> {
        self.map.keys()
    }

    fn content_elements(&self) -> Vec<Element<'_>> {
        self.map.values().map(DavProperty::to_element).collect()
    }
}

impl<'a> IntoIterator for &'a DavPropertySet {
    type Item = &'a DavProperty;
    type IntoIter = hash_map::Values<'a, DavPropertyName, DavProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.values()
    }
}

impl FromIterator<DavProperty> for DavPropertySet {
    fn from_iter<I: IntoIterator<Item = DavProperty>>(iter: I) -> Self {
        let mut set = Self::new();
        for property in iter {
            set.add(property);
        }
        set
    }
}
