//! # tempest-rest
//!
//! Hypermedia response shaping for REST services built on axum.
//!
//! ## Features
//!
//! - **Paging**: validated [`PageRequest`](model::PageRequest)s bound from
//!   per-endpoint query parameters, with client errors mapped to `400 Bad Request`
//! - **Navigation**: [`PositionView`](model::PositionView) computes first,
//!   previous, next, and last page links from a request and element counts
//! - **Metadata**: [`MetaDataView`](model::MetaDataView) describes a resource's
//!   location, allowed methods, and related links
//! - **Envelopes**: [`PageView`](model::PageView) pairs items with position and
//!   metadata, serializing as `{"items", "_position", "_meta"}`
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use tempest_rest::prelude::*;
//!
//! struct OrganizationPaging;
//!
//! impl PagingParams for OrganizationPaging {
//!     const DEFAULT_SORT: &'static str = "name asc";
//! }
//!
//! async fn list_organizations(
//!     Paging(request, ..): Paging<OrganizationPaging>,
//! ) -> Result<PageView<String>> {
//!     let all: Vec<String> = vec!["acme".into(), "globex".into()];
//!     let items: Vec<String> = all
//!         .iter()
//!         .skip(request.offset() as usize)
//!         .take(request.per_page() as usize)
//!         .cloned()
//!         .collect();
//!
//!     let base_url = "/organizations";
//!     let position = PositionView::new(&request, items.len() as i64, all.len() as i64, base_url)?;
//!     let meta = MetaDataView::builder()
//!         .set_href(base_url)
//!         .add_allow([HttpMethod::Get])
//!         .build()?;
//!
//!     Ok(PageView::new(items, position, meta))
//! }
//!
//! # fn main() -> Result<()> {
//! let config = Config::load()?;
//! init_tracing(&config)?;
//!
//! let app: Router = Router::new().route("/organizations", get(list_organizations));
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod observability;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, PagingConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    #[cfg(feature = "http")]
    pub use crate::model::Paging;
    pub use crate::model::{
        HttpMethod, LinkView, MetaDataView, MetaDataViewBuilder, PageParamBinder, PageRequest,
        PageView, PagingParams, PositionView, RequestPaging,
    };
    pub use crate::observability::init_tracing;
}
