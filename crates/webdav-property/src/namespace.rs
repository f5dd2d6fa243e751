use std::borrow::Cow;
use std::hash::Hash;

pub const DAV_NAMESPACE_URI: &str = "DAV:";
pub const DAV_NAMESPACE_ALIAS: &str = "D";

/// An XML namespace together with the prefix it prefers when written out.
///
/// Equality and hashing only look at the URI: `D:getetag` and `dav:getetag`
/// name the same property.
#[derive(Debug, Clone, Eq)]
pub struct Namespace {
    uri: Cow<'static, str>,
    prefix: Option<Cow<'static, str>>,
}

impl Namespace {
    pub const DAV: Namespace = Namespace {
        uri: Cow::Borrowed(DAV_NAMESPACE_URI),
        prefix: Some(Cow::Borrowed(DAV_NAMESPACE_ALIAS)),
    };

    /// Elements that are in no namespace at all.
    pub const EMPTY: Namespace = Namespace {
        uri: Cow::Borrowed(""),
        prefix: None,
    };

    pub fn new(uri: impl Into<Cow<'static, str>>) -> Self {
        Self {
            uri: uri.into(),
            prefix: None,
        }
    }

    pub fn with_prefix(
        uri: impl Into<Cow<'static, str>>,
        prefix: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            uri: uri.into(),
            prefix: Some(prefix.into()),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.uri.is_empty()
    }

    pub fn is_dav(&self) -> bool {
        self.uri == DAV_NAMESPACE_URI
    }
}

/// Returns `true` if `prefix` can be bound with `xmlns:prefix`: a non-empty
/// XML name without a colon, other than the reserved `xml` and `xmlns`.
pub fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first == '_' || first.is_alphabetic()) {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{b7}')) {
        return false;
    }

    prefix != "xml" && prefix != "xmlns"
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Hash for Namespace {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.uri.fmt(f)
    }
}
