use crate::builder::{Declaration, Element, NamespaceWrite, XmlBuilderError};

/// Represents a builder for constructing an XML document.
pub struct Builder<'a> {
    /// The XML declaration.
    declaration: Option<Declaration<'a>>,
    /// The root element of the XML document.
    element: Element<'a>,
}

impl<'a> Builder<'a> {
    /// Creates a new instance of `Builder` with the given declaration and root element.
    ///
    /// # Example
    ///
    /// ```
    /// use webdav_xml::builder::{Builder, Declaration, Element};
    /// let declaration = Declaration::new("1.0", "utf-8");
    /// let element = Element::new("root");
    /// let builder = Builder::new(Some(declaration), element);
    /// assert_eq!(
    ///     builder.to_xml_string().unwrap(),
    ///     "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root/>"
    /// );
    /// ```
    pub fn new(declaration: Option<Declaration<'a>>, element: Element<'a>) -> Self {
        Builder {
            declaration,
            element,
        }
    }

    pub fn write_to<W: std::io::Write>(&self, mut w: W) -> Result<(), XmlBuilderError> {
        if let Some(decl) = &self.declaration {
            decl.write(&mut w)?;
            w.write_all(b"\n")?;
        }
        self.element.ns_write(&mut w, None)
    }

    pub fn to_xml_string(&self) -> Result<String, XmlBuilderError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
