//! Owned XML element tree with namespace-aware serialization.
//!
//! Elements reference namespaces by URI; prefixes come from the
//! declarations in scope when the tree is written out.
mod declaration;
mod document;
mod element;
mod namespace;

use std::borrow::Cow;
use std::collections::HashMap;

pub use self::declaration::*;
pub use self::document::*;
pub use self::element::*;
pub use self::namespace::*;

/// Namespaces in scope and their prefix. `None` marks the default namespace.
pub type AliasMap<'a> = HashMap<Namespace<'a>, Option<Cow<'a, str>>>;

#[derive(Debug, thiserror::Error)]
pub enum XmlBuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("Namespace '{ns}' not declared for tag '{tag}'")]
    NamespaceNotDeclared { tag: String, ns: String },
}

pub trait NamespaceWrite<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: Option<&AliasMap<'a>>,
    ) -> Result<(), XmlBuilderError>;
}

fn escape(value: &str, escape_quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (escape_quotes && c == '"');

    if !value.contains(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if escape_quotes => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

pub(crate) fn escape_text(value: &str) -> Cow<'_, str> {
    escape(value, false)
}

pub(crate) fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, true)
}
