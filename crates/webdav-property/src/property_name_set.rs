use std::collections::HashSet;
use std::collections::hash_set;

use tracing::debug;
use webdav_xml::builder::Element;
use webdav_xml::parser::{Node, XmlDeserialize, child_elements};

use crate::container::{PropContainer, PropContent};
use crate::property_name::DavPropertyName;
use crate::{DavError, expect_prop_element};

/// A set of [`DavPropertyName`]s, typically the content of the `DAV:prop`
/// element of a PROPFIND request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DavPropertyNameSet {
    set: HashSet<DavPropertyName>,
}

impl DavPropertyNameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new set holding the same names as `other`.
    pub fn from_set(other: &DavPropertyNameSet) -> Self {
        let mut set = Self::new();
        set.add_all(other);
        set
    }

    /// Reads every direct child of a `DAV:prop` element as a property name.
    ///
    /// Fails with [`DavError::InvalidArgument`] if `prop` is not a `DAV:prop`
    /// element, and with [`DavError::Xml`] if a child cannot be read.
    /// Duplicate children collapse into one entry.
    pub fn from_prop_element(prop: Node<'_, '_>) -> Result<Self, DavError> {
        expect_prop_element(prop)?;

        let mut set = Self::new();
        for child in child_elements(prop) {
            set.add(DavPropertyName::from_node(child)?);
        }

        debug!(size = set.len(), "read property names from DAV:prop");
        Ok(set)
    }

    /// Adds `name` unless it is already present. Returns `true` if the set changed.
    pub fn add(&mut self, name: DavPropertyName) -> bool {
        self.set.insert(name)
    }

    /// Adds every name of `other`. Returns `true` if at least one was new.
    pub fn add_all(&mut self, other: &DavPropertyNameSet) -> bool {
        let mut changed = false;
        for name in other {
            changed |= self.set.insert(name.clone());
        }
        changed
    }

    /// Returns `true` if `name` was present.
    pub fn remove(&mut self, name: &DavPropertyName) -> bool {
        self.set.remove(name)
    }

    pub fn contains(&self, name: &DavPropertyName) -> bool {
        self.set.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Read-only view of the underlying set.
    pub fn content(&self) -> &HashSet<DavPropertyName> {
        &self.set
    }

    pub fn iter(&self) -> hash_set::Iter<'_, DavPropertyName> {
        self.set.iter()
    }

    /// A cursor that can remove the name it is positioned on.
    ///
    /// The cursor borrows the set mutably, so the set cannot be modified
    /// through any other path while the cursor is alive.
    pub fn cursor(&mut self) -> PropertyNameCursor<'_> {
        PropertyNameCursor::new(&mut self.set)
    }
}

impl PropContainer for DavPropertyNameSet {
    fn contains(&self, name: &DavPropertyName) -> bool {
        self.set.contains(name)
    }

    fn add_content(&mut self, content: PropContent) -> bool {
        match content {
            PropContent::Name(name) => self.add(name),
            other => {
                debug!("DavPropertyName expected, found: {}", other.kind());
                false
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    fn content_size(&self) -> usize {
        self.set.len()
    }

    fn property_names(&self) -> impl Iterator<Item = &DavPropertyName> {
        self.set.iter()
    }

    fn content_elements(&self) -> Vec<Element<'_>> {
        self.set.iter().map(DavPropertyName::to_element).collect()
    }
}

impl<'a> IntoIterator for &'a DavPropertyNameSet {
    type Item = &'a DavPropertyName;
    type IntoIter = hash_set::Iter<'a, DavPropertyName>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

impl IntoIterator for DavPropertyNameSet {
    type Item = DavPropertyName;
    type IntoIter = hash_set::IntoIter<DavPropertyName>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

impl FromIterator<DavPropertyName> for DavPropertyNameSet {
    fn from_iter<I: IntoIterator<Item = DavPropertyName>>(iter: I) -> Self {
        Self {
            set: iter.into_iter().collect(),
        }
    }
}

impl Extend<DavPropertyName> for DavPropertyNameSet {
    fn extend<I: IntoIterator<Item = DavPropertyName>>(&mut self, iter: I) {
        self.set.extend(iter);
    }
}

/// Walks the names of a [`DavPropertyNameSet`] once, with the option to
/// remove the current one.
///
/// The names to visit are fixed when the cursor is created. Once exhausted
/// it keeps returning `None`; ask the set for a new cursor to walk it again.
pub struct PropertyNameCursor<'s> {
    set: &'s mut HashSet<DavPropertyName>,
    pending: std::vec::IntoIter<DavPropertyName>,
    current: Option<DavPropertyName>,
}

impl<'s> PropertyNameCursor<'s> {
    fn new(set: &'s mut HashSet<DavPropertyName>) -> Self {
        let pending = set.iter().cloned().collect::<Vec<_>>().into_iter();
        Self {
            set,
            pending,
            current: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.pending.len() > 0
    }

    /// Moves to the next name and returns it.
    pub fn next_property_name(&mut self) -> Option<&DavPropertyName> {
        self.current = self.pending.next();
        self.current.as_ref()
    }

    /// Removes the name returned by the last call to
    /// [`next_property_name`](Self::next_property_name) from the set.
    ///
    /// Returns `false` if there is no current name, which is the case before
    /// the first call, after exhaustion, and after the current name was
    /// already removed.
    pub fn remove(&mut self) -> bool {
        match self.current.take() {
            Some(name) => self.set.remove(&name),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DavProperty, Namespace, XmlWriteOptions};

    fn custom(name: &'static str) -> DavPropertyName {
        DavPropertyName::new(name, Namespace::with_prefix("http://ns.example.com/z/", "Z"))
    }

    #[test]
    fn test_add_reports_change() {
        let mut set = DavPropertyNameSet::new();

        assert!(set.add(DavPropertyName::GETETAG));
        assert!(!set.add(DavPropertyName::dav("getetag")));
        assert!(set.add(custom("getetag")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_size_counts_distinct_values() {
        let values = [
            DavPropertyName::GETETAG,
            custom("author"),
            DavPropertyName::GETETAG,
            DavPropertyName::DISPLAYNAME,
            custom("author"),
        ];

        let mut set = DavPropertyNameSet::new();
        for value in &values {
            set.add(value.clone());
        }

        assert_eq!(set.len(), 3);
        assert!(values.iter().all(|value| set.contains(value)));
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut set: DavPropertyNameSet = [DavPropertyName::GETETAG].into_iter().collect();

        assert!(!set.remove(&DavPropertyName::DISPLAYNAME));
        assert!(set.remove(&DavPropertyName::GETETAG));
        assert!(!set.contains(&DavPropertyName::GETETAG));
        assert!(!set.remove(&DavPropertyName::GETETAG));
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_all_leaves_other_unchanged() {
        let mut set: DavPropertyNameSet = [DavPropertyName::GETETAG].into_iter().collect();
        let other: DavPropertyNameSet = [DavPropertyName::GETETAG, custom("author")]
            .into_iter()
            .collect();
        let before = other.clone();

        assert!(set.add_all(&other));
        assert!(!set.add_all(&other));

        assert_eq!(other, before);
        assert_eq!(set.len(), 2);
        assert!(other.iter().all(|name| set.contains(name)));
    }

    #[test]
    fn test_from_set_is_independent() {
        let source: DavPropertyNameSet = [DavPropertyName::GETETAG, custom("author")]
            .into_iter()
            .collect();

        let mut copy = DavPropertyNameSet::from_set(&source);
        assert_eq!(copy.len(), source.len());
        assert!(source.iter().all(|name| copy.contains(name)));

        copy.add(DavPropertyName::DISPLAYNAME);
        copy.remove(&DavPropertyName::GETETAG);

        assert_eq!(source.len(), 2);
        assert!(source.contains(&DavPropertyName::GETETAG));
    }

    #[test]
    fn test_iteration_yields_each_member_once() {
        let set: DavPropertyNameSet = DavPropertyName::dav_properties().into_iter().collect();

        let seen: Vec<_> = set.iter().collect();
        let unique: HashSet<_> = seen.iter().collect();

        assert_eq!(seen.len(), set.len());
        assert_eq!(unique.len(), set.len());
        assert!(seen.iter().all(|name| set.contains(name)));
    }

    #[test]
    fn test_cursor_removes_current_name() {
        let mut set: DavPropertyNameSet = [
            DavPropertyName::GETETAG,
            custom("author"),
            custom("editor"),
        ]
        .into_iter()
        .collect();

        let mut cursor = set.cursor();
        let mut visited = 0;
        while let Some(name) = cursor.next_property_name() {
            visited += 1;
            if !name.namespace().is_dav() {
                assert!(cursor.remove());
                assert!(!cursor.remove());
            }
        }

        assert_eq!(visited, 3);
        assert!(!cursor.has_next());
        assert!(cursor.next_property_name().is_none());
        assert!(!cursor.remove());

        assert_eq!(set.len(), 1);
        assert!(set.contains(&DavPropertyName::GETETAG));
    }

    #[test]
    fn test_cursor_remove_before_first_name() {
        let mut set: DavPropertyNameSet = [DavPropertyName::GETETAG].into_iter().collect();

        let mut cursor = set.cursor();
        assert!(cursor.has_next());
        assert!(!cursor.remove());

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_content_accepts_names_only() {
        let mut set = DavPropertyNameSet::new();

        assert!(set.add_content(PropContent::Name(DavPropertyName::GETETAG)));
        assert!(!set.add_content(PropContent::Name(DavPropertyName::GETETAG)));
        assert!(!set.add_content(PropContent::Property(DavProperty::with_value(
            DavPropertyName::DISPLAYNAME,
            "home",
        ))));

        assert_eq!(set.content_size(), 1);
        assert!(!PropContainer::contains(&set, &DavPropertyName::DISPLAYNAME));
    }

    #[test]
    fn test_to_xml_string() {
        let set: DavPropertyNameSet = [DavPropertyName::GETETAG, custom("author")]
            .into_iter()
            .collect();

        let options = XmlWriteOptions::builder().include_declaration(false).build();
        let xml = set.to_xml_string(&options).unwrap();

        assert!(xml.starts_with(
            r#"<D:prop xmlns:D="DAV:" xmlns:Z="http://ns.example.com/z/">"#
        ));
        assert!(xml.contains("<D:getetag/>"));
        assert!(xml.contains("<Z:author/>"));
        assert!(xml.ends_with("</D:prop>"));
    }

    #[test]
    fn test_to_xml_string_rejects_invalid_dav_prefix() {
        let set: DavPropertyNameSet = [DavPropertyName::GETETAG].into_iter().collect();

        for prefix in ["", "a:b", "1st", "xmlns"] {
            let options = XmlWriteOptions::builder().dav_prefix(prefix).build();
            let err = set.to_xml_string(&options).unwrap_err();
            assert!(matches!(err, DavError::InvalidArgument(_)), "{prefix}");
        }
    }

    #[test]
    fn test_to_xml_string_with_custom_prefix_parses_back() {
        let set: DavPropertyNameSet = [DavPropertyName::GETETAG, custom("author")]
            .into_iter()
            .collect();

        let options = XmlWriteOptions::builder().dav_prefix("_dav-1").build();
        let xml = set.to_xml_string(&options).unwrap();
        let document = webdav_xml::parser::parse(&xml).unwrap();

        assert_eq!(DavPropertyNameSet::from_prop_element(document.root_element()).unwrap(), set);
    }

    #[test]
    fn test_empty_set_to_xml_string() {
        let set = DavPropertyNameSet::new();

        let xml = set.to_xml_string(&XmlWriteOptions::default()).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<D:prop xmlns:D=\"DAV:\"/>"
        );
    }
}
