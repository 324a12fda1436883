//! Relational links between resources

use serde::Serialize;

use crate::error::{Error, Result};

/// A link to a related resource, keyed by its relation
///
/// Serializes as `{"rel": "...", "href": "..."}` and can also be rendered as a
/// token for a standard `Link` header.
///
/// # Example
///
/// ```rust
/// use tempest_rest::model::LinkView;
///
/// let link = LinkView::new("next", "http://localhost/ideas?page=1")?;
/// assert_eq!(link.rel(), "next");
/// assert_eq!(link.to_link_header(), "<http://localhost/ideas?page=1>; rel=\"next\"");
/// # Ok::<(), tempest_rest::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LinkView {
    rel: String,
    href: String,
}

impl LinkView {
    /// Create a link
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] if either the relation or the target is empty.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Result<Self> {
        let rel = rel.into();
        let href = href.into();

        if rel.is_empty() {
            return Err(Error::precondition("A link requires a relation"));
        }
        if href.is_empty() {
            return Err(Error::precondition("A link requires a target"));
        }

        Ok(Self { rel, href })
    }

    /// Key indicating what the target leads to
    #[must_use]
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// URL of the resource indicated by the relation
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Render the link as a token for a `Link` header value (RFC 8288)
    #[must_use]
    pub fn to_link_header(&self) -> String {
        format!("<{}>; rel=\"{}\"", self.href, self.rel)
    }
}
