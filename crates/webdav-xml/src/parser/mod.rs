pub use roxmltree::*;

use crate::XmlError;

pub fn parse(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    roxmltree::Document::parse(xml)
}

/// Returns `true` if `node` is an element named `local_name` in `namespace`.
///
/// An empty `namespace` matches elements that carry no namespace at all.
pub fn matches(node: Node<'_, '_>, local_name: &str, namespace: &str) -> bool {
    if !node.is_element() {
        return false;
    }

    let tag_name = node.tag_name();
    tag_name.name() == local_name && tag_name.namespace().unwrap_or_default() == namespace
}

/// Direct element children of `node`. Text, comments and processing
/// instructions are skipped, deeper descendants are never visited.
pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

pub trait XmlVisitor<'a> {
    type Value;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError>;

    fn visit_children(
        &mut self,
        children: impl Iterator<Item = Node<'a, 'a>>,
    ) -> Result<(), XmlError>;

    fn finish(self) -> Result<Self::Value, XmlError>;
}

pub trait XmlDeserialize<'a>: Sized {
    type Visitor: XmlVisitor<'a, Value = Self>;

    fn visitor() -> Self::Visitor;

    fn from_node(node: Node<'a, 'a>) -> Result<Self, XmlError> {
        NodeDeserializer::new(node).deserialize(Self::visitor())
    }
}

/// Drives a visitor over a single node: first the node itself, then its
/// direct children.
pub struct NodeDeserializer<'a> {
    root: Node<'a, 'a>,
}

impl<'a> NodeDeserializer<'a> {
    pub fn new(root: Node<'a, 'a>) -> Self {
        Self { root }
    }

    pub fn deserialize<V>(self, mut visitor: V) -> Result<V::Value, XmlError>
    where
        V: XmlVisitor<'a>,
    {
        tracing::trace!(tag = self.root.tag_name().name(), "deserializing node");
        visitor.visit_node(self.root)?;
        visitor.visit_children(self.root.children())?;
        visitor.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROPFIND: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:" xmlns:Z="http://ns.example.com/z/">
  <!-- requested properties -->
  <D:prop>
    <D:getetag/>
    <Z:author><Z:nested/></Z:author>
    text between elements
    <plain/>
  </D:prop>
</D:propfind>"#;

    #[test]
    fn test_matches_checks_name_and_namespace() {
        let document = parse(PROPFIND).unwrap();
        let root = document.root_element();

        assert!(matches(root, "propfind", "DAV:"));
        assert!(!matches(root, "propfind", "http://ns.example.com/z/"));
        assert!(!matches(root, "prop", "DAV:"));
    }

    #[test]
    fn test_matches_empty_namespace() {
        let document = parse(PROPFIND).unwrap();
        let prop = child_elements(document.root_element()).next().unwrap();
        let plain = child_elements(prop).last().unwrap();

        assert!(matches(plain, "plain", ""));
        assert!(!matches(plain, "plain", "DAV:"));
    }

    #[test]
    fn test_matches_rejects_non_elements() {
        let document = parse(PROPFIND).unwrap();
        let comment = document
            .root_element()
            .children()
            .find(Node::is_comment)
            .unwrap();

        assert!(!matches(comment, "", ""));
    }

    #[test]
    fn test_child_elements_skips_text_and_descendants() {
        let document = parse(PROPFIND).unwrap();
        let prop = child_elements(document.root_element()).next().unwrap();

        let names: Vec<_> = child_elements(prop)
            .map(|child| child.tag_name().name())
            .collect();

        assert_eq!(names, vec!["getetag", "author", "plain"]);
    }

    struct TagNameCollector {
        names: Vec<String>,
    }

    impl<'a> XmlVisitor<'a> for TagNameCollector {
        type Value = Vec<String>;

        fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
            self.names.push(node.tag_name().name().to_string());
            Ok(())
        }

        fn visit_children(
            &mut self,
            children: impl Iterator<Item = Node<'a, 'a>>,
        ) -> Result<(), XmlError> {
            for child in children.filter(Node::is_element) {
                self.names.push(child.tag_name().name().to_string());
            }
            Ok(())
        }

        fn finish(self) -> Result<Self::Value, XmlError> {
            Ok(self.names)
        }
    }

    #[test]
    fn test_node_deserializer_visits_node_then_children() {
        let document = parse(PROPFIND).unwrap();
        let prop = child_elements(document.root_element()).next().unwrap();

        let names = NodeDeserializer::new(prop)
            .deserialize(TagNameCollector { names: Vec::new() })
            .unwrap();

        assert_eq!(names, vec!["prop", "getetag", "author", "plain"]);
    }
}
