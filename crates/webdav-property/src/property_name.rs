use std::borrow::Cow;

use tracing::trace;
use webdav_xml::XmlError;
use webdav_xml::builder::Element;
use webdav_xml::parser::{Node, NodeType, XmlDeserialize, XmlVisitor};

use crate::macros::define_dav_property_names;
use crate::namespace::Namespace;

/// The qualified name of a WebDAV property: a local name in a namespace.
///
/// Two names are equal when both the local name and the namespace URI match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DavPropertyName {
    name: Cow<'static, str>,
    namespace: Namespace,
}

// RFC 4918, section 15
define_dav_property_names!(
    CREATIONDATE => "creationdate",
    DISPLAYNAME => "displayname",
    GETCONTENTLANGUAGE => "getcontentlanguage",
    GETCONTENTLENGTH => "getcontentlength",
    GETCONTENTTYPE => "getcontenttype",
    GETETAG => "getetag",
    GETLASTMODIFIED => "getlastmodified",
    LOCKDISCOVERY => "lockdiscovery",
    RESOURCETYPE => "resourcetype",
    SOURCE => "source",
    SUPPORTEDLOCK => "supportedlock",
);

impl DavPropertyName {
    pub fn new(name: impl Into<Cow<'static, str>>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// A property name in the `DAV:` namespace.
    pub fn dav(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, Namespace::DAV)
    }

    pub(crate) const fn dav_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            namespace: Namespace::DAV,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// An empty element carrying this name, as found inside a `DAV:prop`
    /// of a PROPFIND request.
    pub fn to_element(&self) -> Element<'_> {
        Element::new(&*self.name)
            .set_namespace_optional((!self.namespace.is_empty()).then_some(self.namespace.uri()))
    }

    pub fn into_element(self) -> Element<'static> {
        let namespace = (!self.namespace.is_empty()).then(|| self.namespace.uri().to_owned());
        Element::new(self.name).set_namespace_optional(namespace)
    }
}

impl std::fmt::Display for DavPropertyName {
    /// Clark notation, `{DAV:}getetag`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.name)
        }
    }
}

/// Reads the qualified name of an element, keeping the prefix the document
/// used for its namespace.
pub(crate) fn qualified_name_of(node: Node<'_, '_>) -> Result<DavPropertyName, XmlError> {
    if !node.is_element() {
        return Err(XmlError::InvalidNodeType {
            expected: NodeType::Element,
            found: node.node_type(),
        });
    }

    let tag_name = node.tag_name();
    let namespace = match tag_name.namespace() {
        Some(uri) => match node.lookup_prefix(uri).filter(|prefix| !prefix.is_empty()) {
            Some(prefix) => Namespace::with_prefix(uri.to_owned(), prefix.to_owned()),
            None => Namespace::new(uri.to_owned()),
        },
        None => Namespace::EMPTY,
    };

    Ok(DavPropertyName::new(tag_name.name().to_owned(), namespace))
}

pub struct DavPropertyNameVisitor {
    name: Option<DavPropertyName>,
}

impl<'a> XmlVisitor<'a> for DavPropertyNameVisitor {
    type Value = DavPropertyName;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        self.name = Some(qualified_name_of(node)?);
        Ok(())
    }

    /// Only the element name matters, whatever it contains is ignored.
    fn visit_children(
        &mut self,
        children: impl Iterator<Item = Node<'a, 'a>>,
    ) -> Result<(), XmlError> {
        let ignored = children.filter(Node::is_element).count();
        if ignored > 0 {
            trace!(ignored, "ignoring content of property name element");
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        self.name
            .ok_or_else(|| XmlError::InvalidXml("No property name found".to_string()))
    }
}

impl<'a> XmlDeserialize<'a> for DavPropertyName {
    type Visitor = DavPropertyNameVisitor;

    fn visitor() -> Self::Visitor {
        DavPropertyNameVisitor { name: None }
    }
}
