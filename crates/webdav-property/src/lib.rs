//! WebDAV property names and the `DAV:prop` containers built from them.
//!
//! A `DAV:prop` element shows up in PROPFIND, PROPPATCH and multistatus
//! bodies. Depending on the request it either lists bare property names
//! ([`DavPropertyNameSet`]) or properties with values ([`DavPropertySet`]).
//! Both implement [`PropContainer`].

mod container;
mod macros;
mod namespace;
mod property;
mod property_name;
mod property_name_set;
mod property_set;

pub use container::*;
pub use namespace::*;
pub use property::*;
pub use property_name::*;
pub use property_name_set::*;
pub use property_set::*;

pub use webdav_xml::parser::{XmlDeserialize, XmlVisitor};

pub const XML_PROP: &str = "prop";

#[derive(Debug, thiserror::Error)]
pub enum DavError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Xml(#[from] webdav_xml::XmlError),

    #[error(transparent)]
    Builder(#[from] webdav_xml::builder::XmlBuilderError),
}

/// Fails with [`DavError::InvalidArgument`] unless `node` is a `DAV:prop` element.
pub(crate) fn expect_prop_element(node: webdav_xml::parser::Node<'_, '_>) -> Result<(), DavError> {
    if webdav_xml::parser::matches(node, XML_PROP, DAV_NAMESPACE_URI) {
        return Ok(());
    }

    tracing::debug!(
        tag = node.tag_name().name(),
        namespace = ?node.tag_name().namespace(),
        "rejecting element, DAV:prop expected"
    );
    Err(DavError::InvalidArgument(
        "'DAV:prop' element expected.".to_string(),
    ))
}
