use std::borrow::Cow;

use crate::builder::{
    escape_attribute, escape_text, AliasMap, Namespace, NamespaceWrite, XmlBuilderError,
};

#[derive(Debug, Clone)]
pub enum Content<'a> {
    /// Represents a text content within an XML element.
    Text(Cow<'a, str>),
    /// Represents a child element within an XML element.
    Elements(Vec<Element<'a>>),

    None,
}

/// Represents an XML element.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    /// The local name of the element.
    name: Cow<'a, str>,
    /// The namespace the element belongs to.
    namespace: Option<Namespace<'a>>,
    /// Namespace declarations made on this element, in insertion order.
    /// `None` as alias declares the default namespace.
    namespaces_declaration: Vec<(Namespace<'a>, Option<Cow<'a, str>>)>,
    /// The child elements or text of the element.
    content: Content<'a>,
}

impl<'a> Element<'a> {
    /// Creates a new instance of `Element` with the given name.
    ///
    /// # Example
    ///
    /// ```
    /// use webdav_xml::builder::Element;
    /// let element = Element::new("prop");
    /// assert_eq!(element.name(), "prop");
    /// ```
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        Element {
            name: name.into(),
            namespace: None,
            namespaces_declaration: Vec::new(),
            content: Content::None,
        }
    }

    /// Puts the element in `namespace`. The namespace still has to be
    /// declared on this element or one of its ancestors.
    ///
    /// # Example
    ///
    /// ```
    /// use webdav_xml::builder::{Element, Namespace};
    /// let element = Element::new("prop")
    ///     .set_namespace(Namespace::new("DAV:"))
    ///     .add_namespace_declaration("DAV:", Some("D"));
    /// ```
    pub fn set_namespace(mut self, namespace: impl Into<Namespace<'a>>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn set_namespace_optional(mut self, namespace: Option<impl Into<Namespace<'a>>>) -> Self {
        self.namespace = namespace.map(Into::into);
        self
    }

    /// Declares `url` on this element, with `alias` as prefix or as the
    /// default namespace when `alias` is `None`. Declaring the same URL twice
    /// keeps the last alias.
    pub fn add_namespace_declaration(
        mut self,
        url: impl Into<Cow<'a, str>>,
        alias: Option<impl Into<Cow<'a, str>>>,
    ) -> Self {
        let namespace = Namespace::new(url);
        let alias = alias.map(Into::into);

        if let Some(existing) = self
            .namespaces_declaration
            .iter_mut()
            .find(|(declared, _)| *declared == namespace)
        {
            existing.1 = alias;
        } else {
            self.namespaces_declaration.push((namespace, alias));
        }
        self
    }

    /// Appends a child element. Any text content is replaced.
    pub fn add_child(mut self, child: Element<'a>) -> Self {
        match self.content {
            Content::None | Content::Text(_) => {
                self.content = Content::Elements(vec![child]);
            }
            Content::Elements(ref mut children) => {
                children.push(child);
            }
        }
        self
    }

    pub fn add_children(mut self, children: impl IntoIterator<Item = Element<'a>>) -> Self {
        for child in children {
            self = self.add_child(child);
        }
        self
    }

    /// Sets the text content of the element. Any child elements are replaced.
    pub fn set_text(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&Namespace<'a>> {
        self.namespace.as_ref()
    }

    pub fn content(&self) -> &Content<'a> {
        &self.content
    }

    pub fn children(&self) -> &[Element<'a>] {
        match &self.content {
            Content::Elements(children) => children,
            Content::Text(_) | Content::None => &[],
        }
    }

    fn qualified_name(&self, scope: &AliasMap<'a>) -> Result<Cow<'_, str>, XmlBuilderError> {
        let Some(namespace) = &self.namespace else {
            return Ok(Cow::Borrowed(&*self.name));
        };

        match scope.get(namespace) {
            Some(Some(alias)) => Ok(Cow::Owned(format!("{alias}:{}", self.name))),
            Some(None) => Ok(Cow::Borrowed(&*self.name)),
            None => Err(XmlBuilderError::NamespaceNotDeclared {
                tag: self.name.to_string(),
                ns: namespace.to_string(),
            }),
        }
    }
}

impl<'a> NamespaceWrite<'a> for Element<'a> {
    /// Writes the element and its content. Declarations made on this element
    /// are visible to the element itself and to all of its descendants.
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: Option<&AliasMap<'a>>,
    ) -> Result<(), XmlBuilderError> {
        let mut scope = aliases.cloned().unwrap_or_default();
        for (namespace, alias) in &self.namespaces_declaration {
            scope.insert(namespace.clone(), alias.clone());
        }

        let name = self.qualified_name(&scope)?;
        tracing::trace!(element = %name, "writing element");

        write!(w, "<{name}")?;

        for (namespace, alias) in &self.namespaces_declaration {
            match alias {
                Some(alias) => {
                    write!(w, " xmlns:{alias}=\"{}\"", escape_attribute(&namespace.url))?;
                }
                None => write!(w, " xmlns=\"{}\"", escape_attribute(&namespace.url))?,
            }
        }

        match &self.content {
            Content::None => {
                write!(w, "/>")?;
            }
            Content::Text(value) => {
                write!(w, ">{}</{name}>", escape_text(value))?;
            }
            Content::Elements(children) => {
                write!(w, ">")?;
                for child in children {
                    child.ns_write(w, Some(&scope))?;
                }
                write!(w, "</{name}>")?;
            }
        }
        Ok(())
    }
}
