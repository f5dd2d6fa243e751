use tracing::debug;
use webdav_xml::XmlError;
use webdav_xml::builder::Element;
use webdav_xml::parser::{Node, XmlDeserialize, XmlVisitor};

use crate::property_name::{DavPropertyName, qualified_name_of};

/// A property with a textual value, as found in PROPPATCH requests and
/// multistatus responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavProperty {
    name: DavPropertyName,
    value: Option<String>,
}

impl DavProperty {
    pub fn new(name: DavPropertyName, value: Option<String>) -> Self {
        Self { name, value }
    }

    pub fn with_value(name: DavPropertyName, value: impl Into<String>) -> Self {
        Self::new(name, Some(value.into()))
    }

    pub fn name(&self) -> &DavPropertyName {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn to_element(&self) -> Element<'_> {
        let element = self.name.to_element();
        match &self.value {
            Some(value) => element.set_text(value.as_str()),
            None => element,
        }
    }
}

pub struct DavPropertyVisitor {
    name: Option<DavPropertyName>,
    value: Option<String>,
}

impl<'a> XmlVisitor<'a> for DavPropertyVisitor {
    type Value = DavProperty;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        self.name = Some(qualified_name_of(node)?);
        Ok(())
    }

    fn visit_children(
        &mut self,
        children: impl Iterator<Item = Node<'a, 'a>>,
    ) -> Result<(), XmlError> {
        let mut text = String::new();
        for child in children {
            if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            } else if child.is_element() {
                debug!(
                    child = child.tag_name().name(),
                    "skipping structured property value"
                );
            }
        }

        let text = text.trim();
        if !text.is_empty() {
            self.value = Some(text.to_string());
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        let name = self
            .name
            .ok_or_else(|| XmlError::InvalidXml("No property name found".to_string()))?;
        Ok(DavProperty::new(name, self.value))
    }
}

impl<'a> XmlDeserialize<'a> for DavProperty {
    type Visitor = DavPropertyVisitor;

    fn visitor() -> Self::Visitor {
        DavPropertyVisitor {
            name: None,
            value: None,
        }
    }
}
