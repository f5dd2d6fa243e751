use std::borrow::Cow;

use tracing::debug;
use webdav_xml::builder::{Builder, Declaration, Element};

use crate::namespace::{DAV_NAMESPACE_ALIAS, DAV_NAMESPACE_URI, Namespace, is_valid_prefix};
use crate::property::DavProperty;
use crate::property_name::DavPropertyName;
use crate::{DavError, XML_PROP};

/// Anything that can be stored in a `DAV:prop` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropContent {
    Name(DavPropertyName),
    Property(DavProperty),
}

impl PropContent {
    pub fn kind(&self) -> &'static str {
        match self {
            PropContent::Name(_) => "DavPropertyName",
            PropContent::Property(_) => "DavProperty",
        }
    }

    pub fn property_name(&self) -> &DavPropertyName {
        match self {
            PropContent::Name(name) => name,
            PropContent::Property(property) => property.name(),
        }
    }
}

impl From<DavPropertyName> for PropContent {
    fn from(name: DavPropertyName) -> Self {
        PropContent::Name(name)
    }
}

impl From<DavProperty> for PropContent {
    fn from(property: DavProperty) -> Self {
        PropContent::Property(property)
    }
}

/// How a container is written out as XML.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct XmlWriteOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the element.
    #[builder(default = true)]
    pub include_declaration: bool,
    /// Prefix bound to the `DAV:` namespace. Must be a valid XML prefix.
    #[builder(default = DAV_NAMESPACE_ALIAS.to_string(), setter(into))]
    pub dav_prefix: String,
}

impl Default for XmlWriteOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The content-container capability shared by the `DAV:prop` containers.
pub trait PropContainer {
    fn contains(&self, name: &DavPropertyName) -> bool;

    /// Adds `content` if this container can hold that kind of entry.
    ///
    /// Returns `false` when the entry was not added, either because the
    /// container does not accept its kind or because it was already present.
    fn add_content(&mut self, content: PropContent) -> bool;

    fn is_empty(&self) -> bool;

    fn content_size(&self) -> usize;

    fn property_names(&self) -> impl Iterator<Item = &DavPropertyName>;

    /// One element per entry, in no particular order.
    fn content_elements(&self) -> Vec<Element<'_>>;

    /// Builds the `DAV:prop` element holding every entry. All namespaces are
    /// declared on the `DAV:prop` element itself.
    ///
    /// Fails with [`DavError::InvalidArgument`] if `options.dav_prefix` is
    /// not a valid namespace prefix.
    fn to_element<'s>(&'s self, options: &'s XmlWriteOptions) -> Result<Element<'s>, DavError> {
        if !is_valid_prefix(&options.dav_prefix) {
            debug!(prefix = %options.dav_prefix, "rejecting DAV: namespace prefix");
            return Err(DavError::InvalidArgument(format!(
                "'{}' is not a valid namespace prefix.",
                options.dav_prefix
            )));
        }

        let mut element = Element::new(XML_PROP)
            .set_namespace(DAV_NAMESPACE_URI)
            .add_namespace_declaration(DAV_NAMESPACE_URI, Some(options.dav_prefix.as_str()));

        for (uri, prefix) in namespace_prefixes(self.property_names(), &options.dav_prefix) {
            element = element.add_namespace_declaration(uri, Some(prefix));
        }

        Ok(element.add_children(self.content_elements()))
    }

    fn to_xml_string(&self, options: &XmlWriteOptions) -> Result<String, DavError> {
        let declaration = options
            .include_declaration
            .then(|| Declaration::new("1.0", "UTF-8"));

        let xml = Builder::new(declaration, self.to_element(options)?).to_xml_string()?;
        Ok(xml)
    }
}

/// Picks a prefix for every non-`DAV:` namespace used by `names`. The
/// preferred prefix is kept unless it is invalid or already taken, otherwise
/// `ns<N>` is generated. Namespaces are sorted by URI so the output is stable.
fn namespace_prefixes<'n>(
    names: impl Iterator<Item = &'n DavPropertyName>,
    dav_prefix: &str,
) -> Vec<(&'n str, Cow<'n, str>)> {
    let mut namespaces: Vec<&Namespace> = names
        .map(DavPropertyName::namespace)
        .filter(|namespace| !namespace.is_dav() && !namespace.is_empty())
        .collect();
    namespaces.sort_by(|a, b| a.uri().cmp(b.uri()));
    namespaces.dedup_by(|a, b| a.uri() == b.uri());

    let mut taken: Vec<Cow<'n, str>> = vec![Cow::Owned(dav_prefix.to_string())];
    let mut declarations = Vec::with_capacity(namespaces.len());
    let mut generated = 0usize;

    for namespace in namespaces {
        let prefix = match namespace.prefix() {
            Some(prefix) if is_valid_prefix(prefix) && !taken.iter().any(|t| t == prefix) => {
                Cow::Borrowed(prefix)
            }
            _ => loop {
                let candidate = format!("ns{generated}");
                generated += 1;
                if !taken.iter().any(|t| *t == candidate) {
                    break Cow::Owned(candidate);
                }
            },
        };

        taken.push(prefix.clone());
        declarations.push((namespace.uri(), prefix));
    }

    declarations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_options_defaults() {
        let options = XmlWriteOptions::default();
        assert!(options.include_declaration);
        assert_eq!(options.dav_prefix, "D");

        let options = XmlWriteOptions::builder()
            .include_declaration(false)
            .dav_prefix("dav")
            .build();
        assert!(!options.include_declaration);
        assert_eq!(options.dav_prefix, "dav");
    }

    #[test]
    fn test_namespace_prefixes_keep_preferred_prefix() {
        let names = [
            DavPropertyName::new("b", Namespace::with_prefix("urn:b", "B")),
            DavPropertyName::new("a", Namespace::with_prefix("urn:a", "A")),
            DavPropertyName::new("a2", Namespace::with_prefix("urn:a", "other")),
            DavPropertyName::GETETAG,
        ];

        let prefixes = namespace_prefixes(names.iter(), "D");

        assert_eq!(
            prefixes,
            vec![
                ("urn:a", Cow::Borrowed("A")),
                ("urn:b", Cow::Borrowed("B")),
            ]
        );
    }

    #[test]
    fn test_namespace_prefixes_generate_on_conflict() {
        let names = [
            DavPropertyName::new("a", Namespace::with_prefix("urn:a", "D")),
            DavPropertyName::new("b", Namespace::new("urn:b")),
            DavPropertyName::new("c", Namespace::with_prefix("urn:c", "ns1")),
            DavPropertyName::new("plain", Namespace::EMPTY),
        ];

        let prefixes = namespace_prefixes(names.iter(), "D");

        assert_eq!(
            prefixes,
            vec![
                ("urn:a", Cow::Borrowed("ns0")),
                ("urn:b", Cow::Borrowed("ns1")),
                ("urn:c", Cow::Borrowed("ns2")),
            ]
        );
    }

    #[test]
    fn test_namespace_prefixes_replace_invalid_prefix() {
        let names = [
            DavPropertyName::new("a", Namespace::with_prefix("urn:a", "")),
            DavPropertyName::new("b", Namespace::with_prefix("urn:b", "not valid")),
            DavPropertyName::new("c", Namespace::with_prefix("urn:c", "xmlns")),
        ];

        let prefixes = namespace_prefixes(names.iter(), "D");

        assert_eq!(
            prefixes,
            vec![
                ("urn:a", Cow::Borrowed("ns0")),
                ("urn:b", Cow::Borrowed("ns1")),
                ("urn:c", Cow::Borrowed("ns2")),
            ]
        );
    }

    #[test]
    fn test_prop_content_kind() {
        let name = PropContent::from(DavPropertyName::GETETAG);
        let property = PropContent::from(DavProperty::with_value(
            DavPropertyName::DISPLAYNAME,
            "home",
        ));

        assert_eq!(name.kind(), "DavPropertyName");
        assert_eq!(property.kind(), "DavProperty");
        assert_eq!(property.property_name(), &DavPropertyName::DISPLAYNAME);
    }
}
