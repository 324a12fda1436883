//! Binding page requests from query parameters
//!
//! Every list endpoint names its own paging parameters and defaults through a
//! [`RequestPaging`] configuration. A [`PageParamBinder`] reads the configured
//! parameters, falls back to the defaults for any that are missing, and
//! produces a validated [`PageRequest`]. Malformed or out-of-range values are
//! reported as [`Error::InvalidPagingArgument`], which renders as
//! `400 Bad Request`.
//!
//! With the `http` feature, [`Paging`] does the same as an axum extractor, with
//! the configuration supplied at the type level by a [`PagingParams`]
//! implementation:
//!
//! ```rust,ignore
//! use tempest_rest::model::{Paging, PagingParams};
//!
//! struct ProjectPaging;
//!
//! impl PagingParams for ProjectPaging {
//!     const DEFAULT_SORT: &'static str = "name asc";
//!     const DEFAULT_PER_PAGE: &'static str = "25";
//! }
//!
//! async fn list_projects(Paging(request, ..): Paging<ProjectPaging>) -> impl IntoResponse {
//!     // request.page_number(), request.per_page(), request.sort()
//! }
//! ```

use std::collections::HashMap;

use url::form_urlencoded;

use super::page_request::{PageRequest, PAGE_PARAM, PER_PAGE_PARAM, SORT_PARAM};
use crate::error::{Error, Result};

/// Default page index when the request names none
pub const DEFAULT_PAGE: &str = "0";

/// Default page size when the request names none
pub const DEFAULT_PER_PAGE: &str = "10";

/// Parameter names and defaults for reading a page request
///
/// Defaults are held as text, like inbound values, and go through the same
/// parsing and validation.
///
/// # Example
///
/// ```rust
/// use tempest_rest::model::RequestPaging;
///
/// let paging = RequestPaging::new("created desc")
///     .with_page_name("p")
///     .with_default_per_page("50");
///
/// assert_eq!(paging.page_name, "p");
/// assert_eq!(paging.per_page_name, "per_page");
/// assert_eq!(paging.default_per_page, "50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPaging {
    /// Name of the page index parameter
    pub page_name: String,
    /// Name of the page size parameter
    pub per_page_name: String,
    /// Name of the sort parameter
    pub sort_name: String,
    /// Page index used when the parameter is absent
    pub default_page: String,
    /// Page size used when the parameter is absent
    pub default_per_page: String,
    /// Sort used when the parameter is absent
    pub default_sort: String,
}

impl RequestPaging {
    /// Standard parameter names and defaults with the given default sort
    ///
    /// There is no built-in default sort; every endpoint has to choose one.
    pub fn new(default_sort: impl Into<String>) -> Self {
        Self {
            page_name: PAGE_PARAM.to_string(),
            per_page_name: PER_PAGE_PARAM.to_string(),
            sort_name: SORT_PARAM.to_string(),
            default_page: DEFAULT_PAGE.to_string(),
            default_per_page: DEFAULT_PER_PAGE.to_string(),
            default_sort: default_sort.into(),
        }
    }

    /// Rename the page index parameter
    #[must_use]
    pub fn with_page_name(mut self, name: impl Into<String>) -> Self {
        self.page_name = name.into();
        self
    }

    /// Rename the page size parameter
    #[must_use]
    pub fn with_per_page_name(mut self, name: impl Into<String>) -> Self {
        self.per_page_name = name.into();
        self
    }

    /// Rename the sort parameter
    #[must_use]
    pub fn with_sort_name(mut self, name: impl Into<String>) -> Self {
        self.sort_name = name.into();
        self
    }

    /// Override the default page index
    #[must_use]
    pub fn with_default_page(mut self, value: impl Into<String>) -> Self {
        self.default_page = value.into();
        self
    }

    /// Override the default page size
    #[must_use]
    pub fn with_default_per_page(mut self, value: impl Into<String>) -> Self {
        self.default_per_page = value.into();
        self
    }

    /// Override the default sort
    #[must_use]
    pub fn with_default_sort(mut self, value: impl Into<String>) -> Self {
        self.default_sort = value.into();
        self
    }
}

/// Reads page requests from query parameters
///
/// # Example
///
/// ```rust
/// use tempest_rest::model::{PageParamBinder, PageRequest, RequestPaging};
///
/// let binder = PageParamBinder::new(RequestPaging::new("name asc"));
///
/// let request = binder.bind_query("page=3&sort=name+desc")?;
/// assert_eq!(request, PageRequest::new(3, 10, "name desc")?);
///
/// assert!(binder.bind_query("per_page=nan").is_err());
/// # Ok::<(), tempest_rest::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParamBinder {
    paging: RequestPaging,
}

impl PageParamBinder {
    /// Create a binder for the given configuration
    pub fn new(paging: RequestPaging) -> Self {
        Self { paging }
    }

    /// The configuration this binder reads with
    #[must_use]
    pub fn paging(&self) -> &RequestPaging {
        &self.paging
    }

    /// Bind a page request from `(name, value)` pairs
    ///
    /// When a name occurs more than once its first value is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPagingArgument`] if the page index or size is not
    /// an integer, or if the resulting values fail [`PageRequest`] validation.
    pub fn bind<I, K, V>(&self, params: I) -> Result<PageRequest>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values: HashMap<String, String> = HashMap::new();
        for (name, value) in params {
            let name = name.as_ref();
            if self.is_paging_param(name) && !values.contains_key(name) {
                values.insert(name.to_string(), value.into());
            }
        }

        let result = self.resolve(&values);

        match &result {
            Ok(request) => tracing::debug!(
                page = request.page_number(),
                per_page = request.per_page(),
                sort = request.sort(),
                "Bound page request"
            ),
            Err(e) => tracing::warn!("Rejected paging parameters: {}", e),
        }

        result
    }

    /// Bind a page request from a raw `application/x-www-form-urlencoded` query
    ///
    /// # Errors
    ///
    /// See [`bind`](Self::bind).
    pub fn bind_query(&self, query: &str) -> Result<PageRequest> {
        self.bind(form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k, v.into_owned())))
    }

    fn resolve(&self, values: &HashMap<String, String>) -> Result<PageRequest> {
        let paging = &self.paging;
        let page = lookup(values, &paging.page_name, &paging.default_page);
        let per_page = lookup(values, &paging.per_page_name, &paging.default_per_page);
        let sort = lookup(values, &paging.sort_name, &paging.default_sort);

        PageRequest::new(
            parse_integer(&paging.page_name, page)?,
            parse_integer(&paging.per_page_name, per_page)?,
            sort,
        )
    }

    fn is_paging_param(&self, name: &str) -> bool {
        name == self.paging.page_name
            || name == self.paging.per_page_name
            || name == self.paging.sort_name
    }
}

impl From<RequestPaging> for PageParamBinder {
    fn from(paging: RequestPaging) -> Self {
        Self::new(paging)
    }
}

fn lookup<'a>(values: &'a HashMap<String, String>, name: &str, default: &'a str) -> &'a str {
    values.get(name).map(String::as_str).unwrap_or(default)
}

fn parse_integer(name: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| {
        Error::invalid_paging(format!(
            "Parameter '{name}' must be an integer (Input: {value:?})"
        ))
    })
}

/// Paging configuration carried at the type level, for use with [`Paging`]
///
/// Only [`DEFAULT_SORT`](Self::DEFAULT_SORT) is required; everything else
/// defaults to the standard names and values.
pub trait PagingParams {
    /// Name of the page index parameter
    const PAGE_NAME: &'static str = PAGE_PARAM;
    /// Name of the page size parameter
    const PER_PAGE_NAME: &'static str = PER_PAGE_PARAM;
    /// Name of the sort parameter
    const SORT_NAME: &'static str = SORT_PARAM;
    /// Page index used when the parameter is absent
    const DEFAULT_PAGE: &'static str = self::DEFAULT_PAGE;
    /// Page size used when the parameter is absent
    const DEFAULT_PER_PAGE: &'static str = self::DEFAULT_PER_PAGE;
    /// Sort used when the parameter is absent
    const DEFAULT_SORT: &'static str;

    /// The configuration described by the constants
    fn request_paging() -> RequestPaging {
        RequestPaging {
            page_name: Self::PAGE_NAME.to_string(),
            per_page_name: Self::PER_PAGE_NAME.to_string(),
            sort_name: Self::SORT_NAME.to_string(),
            default_page: Self::DEFAULT_PAGE.to_string(),
            default_per_page: Self::DEFAULT_PER_PAGE.to_string(),
            default_sort: Self::DEFAULT_SORT.to_string(),
        }
    }
}

#[cfg(feature = "http")]
mod extract {
    use std::marker::PhantomData;

    use axum::{extract::FromRequestParts, http::request::Parts};

    use super::{PageParamBinder, PagingParams};
    use crate::error::Error;
    use crate::model::PageRequest;

    /// Axum extractor producing a [`PageRequest`] from the request query
    ///
    /// Rejects with [`Error::InvalidPagingArgument`] (`400 Bad Request`) when
    /// the parameters are malformed or out of range.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Paging<P>(pub PageRequest, pub PhantomData<P>);

    impl<P> Paging<P> {
        /// The bound page request
        pub fn into_inner(self) -> PageRequest {
            self.0
        }
    }

    impl<P> std::ops::Deref for Paging<P> {
        type Target = PageRequest;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl<S, P> FromRequestParts<S> for Paging<P>
    where
        S: Send + Sync,
        P: PagingParams + Send + Sync,
    {
        type Rejection = Error;

        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            let binder = PageParamBinder::new(P::request_paging());
            let request = binder.bind_query(parts.uri.query().unwrap_or_default())?;
            Ok(Paging(request, PhantomData))
        }
    }
}

#[cfg(feature = "http")]
pub use extract::Paging;
