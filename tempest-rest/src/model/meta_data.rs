//! Resource metadata: canonical location, allowed methods, related links

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::link::LinkView;
use crate::error::{Error, Result};

/// HTTP method that may be allowed on a resource location
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// HEAD
    Head,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Upper-case method name as it appears on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            "TRACE" => Ok(Self::Trace),
            _ => Err(Error::precondition(format!("Unknown HTTP method: {s:?}"))),
        }
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Trace => http::Method::TRACE,
        }
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = Error;

    fn try_from(method: &http::Method) -> Result<Self> {
        method.as_str().parse()
    }
}

/// Web metadata describing where a representation lives, what may be done
/// there, and which resources relate to it
///
/// Built incrementally with [`MetaDataView::builder`] and immutable afterwards.
/// The allowed methods form a set; links keep the order they were added in.
///
/// # Example
///
/// ```rust
/// use tempest_rest::model::{HttpMethod, MetaDataView};
///
/// let meta = MetaDataView::builder()
///     .set_href("http://localhost/organizations")
///     .add_allow([HttpMethod::Get, HttpMethod::Post, HttpMethod::Get])
///     .add_link("self", "http://localhost/organizations")
///     .build()?;
///
/// assert_eq!(meta.allow().len(), 2);
/// assert_eq!(meta.links()[0].rel(), "self");
/// # Ok::<(), tempest_rest::error::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MetaDataView {
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    allow: BTreeSet<HttpMethod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<LinkView>,
}

impl MetaDataView {
    /// Start building metadata
    #[must_use]
    pub fn builder() -> MetaDataViewBuilder {
        MetaDataViewBuilder::default()
    }

    /// Location the containing representation may be read from
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Methods allowed on the location
    #[must_use]
    pub fn allow(&self) -> &BTreeSet<HttpMethod> {
        &self.allow
    }

    /// Links to associated resources, in insertion order
    #[must_use]
    pub fn links(&self) -> &[LinkView] {
        &self.links
    }
}

/// Incremental builder for [`MetaDataView`]
///
/// Setters chain by value. The first invalid input (an empty link relation or
/// target, an unknown method name) is remembered and reported by
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct MetaDataViewBuilder {
    href: Option<String>,
    allow: BTreeSet<HttpMethod>,
    links: Vec<LinkView>,
    error: Option<Error>,
}

impl MetaDataViewBuilder {
    /// Set the location the representation may be read from
    #[must_use]
    pub fn set_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Add methods to the allowed set
    #[must_use]
    pub fn add_allow(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.allow.extend(methods);
        self
    }

    /// Add methods to the allowed set by name
    ///
    /// Names are matched case-insensitively. If any name is unknown none of the
    /// given methods are added and [`build`](Self::build) fails.
    #[must_use]
    pub fn add_allow_named<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed: Result<Vec<HttpMethod>> =
            methods.into_iter().map(|m| m.as_ref().parse()).collect();

        match parsed {
            Ok(methods) => self.allow.extend(methods),
            Err(e) => self.record(e),
        }
        self
    }

    /// Add a link from its relation and target
    #[must_use]
    pub fn add_link(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        match LinkView::new(rel, href) {
            Ok(link) => self.links.push(link),
            Err(e) => self.record(e),
        }
        self
    }

    /// Add an existing link
    #[must_use]
    pub fn add_link_view(mut self, link: LinkView) -> Self {
        self.links.push(link);
        self
    }

    /// Freeze the collected values
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while building.
    pub fn build(self) -> Result<MetaDataView> {
        if let Some(e) = self.error {
            return Err(e);
        }

        Ok(MetaDataView {
            href: self.href,
            allow: self.allow,
            links: self.links,
        })
    }

    fn record(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
