//! Hypermedia view models for REST responses
//!
//! This module provides the value objects a list endpoint needs to describe a
//! page of results: the page that was asked for, where that page sits in the
//! full result set, and metadata about the resource itself.
//!
//! # Flow
//!
//! 1. Bind a [`PageRequest`] from query parameters with a [`PageParamBinder`]
//!    (or the [`Paging`] extractor).
//! 2. Run the query elsewhere to get the page's items and the total count.
//! 3. Compute a [`PositionView`] and build a [`MetaDataView`].
//! 4. Return a [`PageView`] to the client.
//!
//! # Example
//!
//! ```rust
//! use tempest_rest::model::{
//!     HttpMethod, MetaDataView, PageParamBinder, PageView, PositionView, RequestPaging,
//! };
//!
//! let binder = PageParamBinder::new(RequestPaging::new("name asc"));
//! let request = binder.bind_query("page=1&per_page=2")?;
//!
//! let all = ["acme", "globex", "initech", "umbrella", "hooli"];
//! let items: Vec<&str> = all
//!     .iter()
//!     .copied()
//!     .skip(request.offset() as usize)
//!     .take(request.per_page() as usize)
//!     .collect();
//!
//! let base_url = "http://localhost/organizations";
//! let position = PositionView::new(&request, items.len() as i64, all.len() as i64, base_url)?;
//! let meta = MetaDataView::builder()
//!     .set_href(request.apply_url_query(base_url))
//!     .add_allow([HttpMethod::Get, HttpMethod::Post])
//!     .build()?;
//!
//! let page = PageView::new(items, position, meta);
//! assert_eq!(page.items(), &["initech", "umbrella"]);
//! assert!(page.position().next_page().is_some());
//! # Ok::<(), tempest_rest::error::Error>(())
//! ```

mod link;
mod meta_data;
mod page_request;
mod page_view;
mod paging;
mod position;

pub use link::LinkView;
pub use meta_data::{HttpMethod, MetaDataView, MetaDataViewBuilder};
pub use page_request::{PageRequest, PAGE_PARAM, PER_PAGE_PARAM, SORT_PARAM};
pub use page_view::PageView;
#[cfg(feature = "http")]
pub use paging::Paging;
pub use paging::{PageParamBinder, PagingParams, RequestPaging, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use position::{PositionView, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};
