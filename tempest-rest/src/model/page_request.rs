//! Requests for a bounded slice of an ordered result set

use url::form_urlencoded;

use crate::error::{Error, Result};

/// Query parameter carrying the page index in generated URLs
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size in generated URLs
pub const PER_PAGE_PARAM: &str = "per_page";

/// Query parameter carrying the sort specification in generated URLs
pub const SORT_PARAM: &str = "sort";

/// A validated request for one page of results
///
/// The page index is zero-based, the page size is at least one, and the sort
/// specification is non-blank. The sort takes the form `"(field) [asc|desc]"`
/// and may be a comma-separated list of several such pairs; it is otherwise
/// opaque to this type.
///
/// # Example
///
/// ```rust
/// use tempest_rest::model::PageRequest;
///
/// let request = PageRequest::new(2, 10, "name asc")?;
/// assert_eq!(request.offset(), 20);
///
/// let first = request.with_page_index(0)?;
/// assert_eq!(first.per_page(), 10);
/// assert_eq!(
///     first.apply_url_query("http://localhost/projects"),
///     "http://localhost/projects?page=0&per_page=10&sort=name+asc"
/// );
/// # Ok::<(), tempest_rest::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_number: i64,
    per_page: i64,
    sort: String,
}

impl PageRequest {
    /// Create a page request
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPagingArgument`] if `page_number` is negative,
    /// `per_page` is less than one, or `sort` is empty after trimming.
    pub fn new(page_number: i64, per_page: i64, sort: impl Into<String>) -> Result<Self> {
        let sort = sort.into();

        if page_number < 0 {
            return Err(Error::invalid_paging("Cannot read a negative page"));
        }
        if per_page < 1 {
            return Err(Error::invalid_paging("Cannot read 0 or fewer values"));
        }
        if sort.trim().is_empty() {
            return Err(Error::invalid_paging("Cannot specify an empty sort"));
        }

        Ok(Self {
            page_number,
            per_page,
            sort,
        })
    }

    /// Zero-based index of the requested page
    #[must_use]
    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    /// Maximum number of elements in a page
    #[must_use]
    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Sort specification
    #[must_use]
    pub fn sort(&self) -> &str {
        &self.sort
    }

    /// Number of elements that precede the requested page
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.page_number.saturating_mul(self.per_page)
    }

    /// Request a different page with the same size and sort
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPagingArgument`] if `page_number` is negative.
    pub fn with_page_index(&self, page_number: i64) -> Result<Self> {
        if page_number < 0 {
            return Err(Error::invalid_paging("Cannot request a negative page"));
        }

        Ok(Self {
            page_number,
            per_page: self.per_page,
            sort: self.sort.clone(),
        })
    }

    /// Render the paging parameters as a query string
    ///
    /// Parameters are always emitted as `page`, `per_page`, `sort`, in that
    /// order, using form-urlencoding for the values.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(PAGE_PARAM, &self.page_number.to_string())
            .append_pair(PER_PAGE_PARAM, &self.per_page.to_string())
            .append_pair(SORT_PARAM, &self.sort)
            .finish()
    }

    /// Append the paging parameters to a URL
    ///
    /// `base_url` is the resource location without paging parameters. If it
    /// already carries a query string the paging parameters are added after it.
    #[must_use]
    pub fn apply_url_query(&self, base_url: &str) -> String {
        let (base, fragment) = match base_url.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (base_url, None),
        };

        let separator = match base.find('?') {
            None => "?",
            Some(pos) if pos + 1 == base.len() || base.ends_with('&') => "",
            Some(_) => "&",
        };

        let mut url = format!("{}{}{}", base, separator, self.to_query_string());
        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_values() {
        let request = PageRequest::new(1, 10, "sort asc").unwrap();
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.per_page(), 10);
        assert_eq!(request.sort(), "sort asc");
    }

    #[test]
    fn test_negative_page_rejected() {
        let err = PageRequest::new(-1, 10, "sort asc").unwrap_err();
        assert!(matches!(err, Error::InvalidPagingArgument(_)));
    }

    #[test]
    fn test_zero_per_page_rejected() {
        let err = PageRequest::new(0, 0, "sort asc").unwrap_err();
        assert!(matches!(err, Error::InvalidPagingArgument(_)));
    }

    #[test]
    fn test_blank_sort_rejected() {
        assert!(PageRequest::new(0, 10, "").is_err());
        assert!(PageRequest::new(0, 10, " \t ").is_err());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(0, 10, "s").unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 25, "s").unwrap().offset(), 75);
    }

    #[test]
    fn test_with_page_index_keeps_size_and_sort() {
        let request = PageRequest::new(1, 10, "sort asc").unwrap();
        let other = request.with_page_index(5).unwrap();
        assert_eq!(other, PageRequest::new(5, 10, "sort asc").unwrap());
    }

    #[test]
    fn test_with_page_index_negative_rejected() {
        let request = PageRequest::new(1, 10, "sort asc").unwrap();
        let err = request.with_page_index(-1).unwrap_err();
        assert!(matches!(err, Error::InvalidPagingArgument(_)));
    }

    #[test]
    fn test_with_page_index_idempotent() {
        let request = PageRequest::new(4, 10, "sort asc").unwrap();
        let once = request.with_page_index(7).unwrap();
        let twice = once.with_page_index(7).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_query_string_order() {
        let request = PageRequest::new(2, 20, "name").unwrap();
        assert_eq!(request.to_query_string(), "page=2&per_page=20&sort=name");
    }

    #[test]
    fn test_query_string_encodes_sort() {
        let request = PageRequest::new(0, 10, "name asc,id desc").unwrap();
        assert_eq!(
            request.to_query_string(),
            "page=0&per_page=10&sort=name+asc%2Cid+desc"
        );
    }

    #[test]
    fn test_apply_url_query_plain_base() {
        let request = PageRequest::new(1, 10, "id").unwrap();
        assert_eq!(
            request.apply_url_query("http://localhost"),
            "http://localhost?page=1&per_page=10&sort=id"
        );
    }

    #[test]
    fn test_apply_url_query_existing_query() {
        let request = PageRequest::new(1, 10, "id").unwrap();
        assert_eq!(
            request.apply_url_query("http://localhost/goals?owner=me"),
            "http://localhost/goals?owner=me&page=1&per_page=10&sort=id"
        );
        assert_eq!(
            request.apply_url_query("http://localhost/goals?"),
            "http://localhost/goals?page=1&per_page=10&sort=id"
        );
    }

    #[test]
    fn test_apply_url_query_keeps_fragment_last() {
        let request = PageRequest::new(0, 5, "id").unwrap();
        assert_eq!(
            request.apply_url_query("/ideas#top"),
            "/ideas?page=0&per_page=5&sort=id#top"
        );
    }
}
