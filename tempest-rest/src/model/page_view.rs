//! Paginated response envelope

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::meta_data::MetaDataView;
use super::position::PositionView;

/// A page of items together with its position and metadata
///
/// Serializes as
///
/// ```json
/// { "items": [...], "_position": {...}, "_meta": {...} }
/// ```
///
/// When returned from an axum handler the navigation links are also mirrored
/// into a `Link` header.
///
/// # Example
///
/// ```rust
/// use tempest_rest::model::{MetaDataView, PageRequest, PageView, PositionView};
///
/// let request = PageRequest::new(0, 2, "name")?;
/// let items = vec!["alpha", "beta"];
/// let position = PositionView::new(&request, items.len() as i64, 5, "http://localhost/ideas")?;
/// let meta = MetaDataView::builder().set_href("http://localhost/ideas").build()?;
///
/// let page = PageView::new(items, position, meta);
/// assert_eq!(page.items().len(), 2);
/// assert_eq!(page.position().last_index(), 2);
/// # Ok::<(), tempest_rest::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PageView<T> {
    items: Vec<T>,
    #[serde(rename = "_position")]
    position: PositionView,
    #[serde(rename = "_meta")]
    meta_data: MetaDataView,
}

impl<T> PageView<T> {
    /// Assemble a page envelope
    pub fn new(items: Vec<T>, position: PositionView, meta_data: MetaDataView) -> Self {
        Self {
            items,
            position,
            meta_data,
        }
    }

    /// Bounded, ordered list of representations
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Location of the items within the full result set
    #[must_use]
    pub fn position(&self) -> &PositionView {
        &self.position
    }

    /// Location, allowed methods, and related resources
    #[must_use]
    pub fn meta_data(&self) -> &MetaDataView {
        &self.meta_data
    }

    /// Split the envelope into its parts
    pub fn into_parts(self) -> (Vec<T>, PositionView, MetaDataView) {
        (self.items, self.position, self.meta_data)
    }

    /// Map each item to a new representation, keeping position and metadata
    pub fn map<U, F>(self, f: F) -> PageView<U>
    where
        F: FnMut(T) -> U,
    {
        PageView {
            items: self.items.into_iter().map(f).collect(),
            position: self.position,
            meta_data: self.meta_data,
        }
    }
}

impl<T: Serialize> IntoResponse for PageView<T> {
    fn into_response(self) -> Response {
        let link_header = self.position.link_header();
        let mut response = (StatusCode::OK, Json(&self)).into_response();

        if let Some(links) = link_header {
            if let Ok(header_value) = HeaderValue::from_str(&links) {
                response.headers_mut().insert(header::LINK, header_value);
            }
        }

        response
    }
}
