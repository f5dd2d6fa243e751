use core::fmt;
use std::borrow::Cow;
use std::hash::Hash;

/// A namespace URI as used by the builder. Prefixes are not part of the
/// namespace itself, they come from the declarations in scope.
#[derive(Debug, Clone, Eq)]
pub struct Namespace<'a> {
    pub url: Cow<'a, str>,
}

impl PartialEq for Namespace<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl fmt::Display for Namespace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

impl Hash for Namespace<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl<'a> Namespace<'a> {
    /// Creates a new instance of `Namespace` for the given URI.
    ///
    /// # Example
    ///
    /// ```
    /// use webdav_xml::builder::Namespace;
    /// let namespace = Namespace::new("DAV:");
    /// assert_eq!(namespace.to_string(), "DAV:");
    /// ```
    pub fn new(uri: impl Into<Cow<'a, str>>) -> Self {
        Namespace { url: uri.into() }
    }
}

impl<'a> From<&'a str> for Namespace<'a> {
    fn from(uri: &'a str) -> Self {
        Namespace::new(uri)
    }
}

impl From<String> for Namespace<'_> {
    fn from(uri: String) -> Self {
        Namespace::new(uri)
    }
}
