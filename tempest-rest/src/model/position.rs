//! Position of a page within a paginated result set
//!
//! [`PositionView`] is computed once per response from the page that was
//! requested, how many elements that page actually holds, and how many elements
//! exist across all pages. Navigation links are only included when they lead
//! somewhere: `first`/`previous` on every page after the first, `next`/`last`
//! whenever elements remain beyond the current page.

use serde::Serialize;

use super::link::LinkView;
use super::page_request::PageRequest;
use crate::error::{Error, Result};

/// Link relation for the first page
pub const REL_FIRST: &str = "first";

/// Link relation for the previous page
pub const REL_PREV: &str = "prev";

/// Link relation for the next page
pub const REL_NEXT: &str = "next";

/// Link relation for the last page
pub const REL_LAST: &str = "last";

/// Page navigation links and position data
///
/// # Example
///
/// ```rust
/// use tempest_rest::model::{PageRequest, PositionView};
///
/// let request = PageRequest::new(0, 10, "name asc")?;
/// let position = PositionView::new(&request, 10, 100, "http://localhost/users")?;
///
/// assert_eq!(position.last_index(), 9);
/// assert!(position.first_page().is_none());
/// assert_eq!(
///     position.next_page(),
///     Some("http://localhost/users?page=1&per_page=10&sort=name+asc")
/// );
/// # Ok::<(), tempest_rest::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    index: i64,
    last_index: i64,
    total_elements: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_page: Option<String>,
}

impl PositionView {
    /// Compute the position of `request` within the result set
    ///
    /// # Arguments
    ///
    /// * `request` - The page index, page size, and sort that were served
    /// * `elements_in_page` - Number of elements actually returned for the page
    /// * `total_elements` - Number of elements available across all pages
    /// * `base_url` - Location of the paged resource, without paging parameters
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] if either count is negative or the page
    /// holds more elements than exist in total.
    pub fn new(
        request: &PageRequest,
        elements_in_page: i64,
        total_elements: i64,
        base_url: &str,
    ) -> Result<Self> {
        if elements_in_page < 0 {
            return Err(Error::precondition(format!(
                "There cannot be less than 0 elements in the page (Input: {elements_in_page})"
            )));
        }
        if total_elements < 0 {
            return Err(Error::precondition(format!(
                "There cannot be less than 0 total elements (Input: {total_elements})"
            )));
        }
        if elements_in_page > total_elements {
            return Err(Error::precondition(format!(
                "There cannot be more elements in the page than total elements (Input: {elements_in_page}, {total_elements})"
            )));
        }

        let index = request.page_number();
        let per_page = request.per_page();
        let elements_in_previous_pages = request.offset();

        // The increment only applies once there is more than one page's worth
        // of elements; a single partial page stays at index 0.
        let mut last_index = (total_elements / per_page - 1).max(0);
        if total_elements > 0 && total_elements > per_page && total_elements % per_page != 0 {
            last_index += 1;
        }

        let (first_page, previous_page) = if index > 0 {
            (
                Some(page_url(request, 0, base_url)?),
                Some(page_url(request, index - 1, base_url)?),
            )
        } else {
            (None, None)
        };

        let (next_page, last_page) =
            if elements_in_previous_pages.saturating_add(elements_in_page) < total_elements {
                (
                    Some(page_url(request, index.saturating_add(1), base_url)?),
                    Some(page_url(request, last_index, base_url)?),
                )
            } else {
                (None, None)
            };

        tracing::debug!(
            index,
            last_index,
            total_elements,
            elements_in_page,
            "Computed page position"
        );

        Ok(Self {
            index,
            last_index,
            total_elements,
            first_page,
            previous_page,
            next_page,
            last_page,
        })
    }

    /// Zero-based index of the represented page
    #[must_use]
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Zero-based index of the last page in the result set
    #[must_use]
    pub fn last_index(&self) -> i64 {
        self.last_index
    }

    /// Total number of elements available to be paged
    #[must_use]
    pub fn total_elements(&self) -> i64 {
        self.total_elements
    }

    /// Link to the first page, absent on the first page
    #[must_use]
    pub fn first_page(&self) -> Option<&str> {
        self.first_page.as_deref()
    }

    /// Link to the previous page, absent on the first page
    #[must_use]
    pub fn previous_page(&self) -> Option<&str> {
        self.previous_page.as_deref()
    }

    /// Link to the next page, absent once the final element has been reached
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Link to the last page, absent once the final element has been reached
    #[must_use]
    pub fn last_page(&self) -> Option<&str> {
        self.last_page.as_deref()
    }

    /// The navigation links that are present, in first/prev/next/last order
    #[must_use]
    pub fn links(&self) -> Vec<LinkView> {
        [
            (REL_FIRST, &self.first_page),
            (REL_PREV, &self.previous_page),
            (REL_NEXT, &self.next_page),
            (REL_LAST, &self.last_page),
        ]
        .into_iter()
        .filter_map(|(rel, href)| {
            href.as_ref()
                .and_then(|href| LinkView::new(rel, href.as_str()).ok())
        })
        .collect()
    }

    /// Navigation links rendered as a single `Link` header value
    ///
    /// Returns `None` when there is nothing to navigate to.
    #[must_use]
    pub fn link_header(&self) -> Option<String> {
        let links = self.links();
        if links.is_empty() {
            return None;
        }

        Some(
            links
                .iter()
                .map(LinkView::to_link_header)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// URL that reads `page_number` with the size and sort of `current`
fn page_url(current: &PageRequest, page_number: i64, base_url: &str) -> Result<String> {
    let target = current.with_page_index(page_number)?;
    Ok(target.apply_url_query(base_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::form_urlencoded;

    const BASE_URL: &str = "http://localhost";

    fn request(page: i64, per_page: i64) -> PageRequest {
        PageRequest::new(page, per_page, "sort asc").unwrap()
    }

    fn assert_url(url: Option<&str>, page: i64, per_page: i64, sort: &str) {
        let url = url.expect("link should be present");
        let (base, query) = url.split_once('?').expect("link should carry a query");
        assert_eq!(base, BASE_URL);

        let params: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            params,
            vec![
                ("page".to_string(), page.to_string()),
                ("per_page".to_string(), per_page.to_string()),
                ("sort".to_string(), sort.to_string()),
            ]
        );
    }

    #[test]
    fn test_negative_elements_in_page_rejected() {
        let err = PositionView::new(&request(1, 10), -1, 1, BASE_URL).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_negative_total_elements_rejected() {
        let err = PositionView::new(&request(1, 10), 1, -1, BASE_URL).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_more_in_page_than_total_rejected() {
        let err = PositionView::new(&request(1, 10), 2, 1, BASE_URL).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_single_page() {
        let result = PositionView::new(&request(0, 10), 10, 10, BASE_URL).unwrap();

        assert_eq!(result.index(), 0);
        assert_eq!(result.last_index(), 0);
        assert_eq!(result.total_elements(), 10);
        assert!(result.first_page().is_none());
        assert!(result.previous_page().is_none());
        assert!(result.next_page().is_none());
        assert!(result.last_page().is_none());
    }

    #[test]
    fn test_first_page() {
        let result = PositionView::new(&request(0, 10), 10, 100, BASE_URL).unwrap();

        assert_eq!(result.index(), 0);
        assert_eq!(result.last_index(), 9);
        assert_eq!(result.total_elements(), 100);
        assert!(result.first_page().is_none());
        assert!(result.previous_page().is_none());
        assert_url(result.next_page(), 1, 10, "sort asc");
        assert_url(result.last_page(), 9, 10, "sort asc");
    }

    #[test]
    fn test_last_page() {
        let result = PositionView::new(&request(9, 10), 10, 100, BASE_URL).unwrap();

        assert_eq!(result.index(), 9);
        assert_eq!(result.last_index(), 9);
        assert_url(result.first_page(), 0, 10, "sort asc");
        assert_url(result.previous_page(), 8, 10, "sort asc");
        assert!(result.next_page().is_none());
        assert!(result.last_page().is_none());
    }

    #[test]
    fn test_middle_page() {
        let result = PositionView::new(&request(5, 10), 10, 100, BASE_URL).unwrap();

        assert_eq!(result.index(), 5);
        assert_eq!(result.last_index(), 9);
        assert_url(result.first_page(), 0, 10, "sort asc");
        assert_url(result.previous_page(), 4, 10, "sort asc");
        assert_url(result.next_page(), 6, 10, "sort asc");
        assert_url(result.last_page(), 9, 10, "sort asc");
    }

    #[test]
    fn test_partial_last_page() {
        // 45 elements at 10 per page: pages 0..=4, the last holding 5
        let result = PositionView::new(&request(0, 10), 10, 45, BASE_URL).unwrap();
        assert_eq!(result.last_index(), 4);
        assert_url(result.last_page(), 4, 10, "sort asc");

        let result = PositionView::new(&request(4, 10), 5, 45, BASE_URL).unwrap();
        assert_eq!(result.last_index(), 4);
        assert!(result.next_page().is_none());
    }

    #[test]
    fn test_no_elements() {
        let result = PositionView::new(&request(0, 10), 0, 0, BASE_URL).unwrap();

        assert_eq!(result.last_index(), 0);
        assert!(result.links().is_empty());
        assert!(result.link_header().is_none());
    }

    #[test]
    fn test_fewer_elements_than_page_size() {
        let result = PositionView::new(&request(0, 10), 3, 3, BASE_URL).unwrap();
        assert_eq!(result.last_index(), 0);
        assert!(result.links().is_empty());
    }

    #[test]
    fn test_links_order_and_relations() {
        let result = PositionView::new(&request(5, 10), 10, 100, BASE_URL).unwrap();
        let links = result.links();
        let rels: Vec<&str> = links.iter().map(LinkView::rel).collect();
        assert_eq!(rels, vec!["first", "prev", "next", "last"]);
    }

    #[test]
    fn test_link_header() {
        let result = PositionView::new(&request(0, 10), 10, 20, BASE_URL).unwrap();
        assert_eq!(
            result.link_header().unwrap(),
            "<http://localhost?page=1&per_page=10&sort=sort+asc>; rel=\"next\", \
             <http://localhost?page=1&per_page=10&sort=sort+asc>; rel=\"last\""
        );
    }

    #[test]
    fn test_value_equality() {
        let a = PositionView::new(&request(1, 10), 1, 1, "http://localhost1").unwrap();
        let b = PositionView::new(&request(1, 10), 1, 1, "http://localhost1").unwrap();
        let c = PositionView::new(&request(1, 10), 1, 1, "http://localhost2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serialization_omits_absent_links() {
        let result = PositionView::new(&request(0, 10), 10, 10, BASE_URL).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "index": 0, "lastIndex": 0, "totalElements": 10 })
        );
    }

    #[test]
    fn test_serialization_field_names() {
        let result = PositionView::new(&request(5, 10), 10, 100, BASE_URL).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "index",
            "lastIndex",
            "totalElements",
            "firstPage",
            "previousPage",
            "nextPage",
            "lastPage",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }
}
