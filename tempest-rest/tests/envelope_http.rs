//! End-to-end tests for paged list endpoints served through axum.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value;
use tempest_rest::prelude::*;
use tower::ServiceExt;

const PROJECTS: [&str; 5] = ["apollo", "gemini", "mercury", "skylab", "voyager"];

struct ProjectPaging;

impl PagingParams for ProjectPaging {
    const DEFAULT_SORT: &'static str = "name asc";
    const DEFAULT_PER_PAGE: &'static str = "2";
}

async fn list_projects(Paging(request, ..): Paging<ProjectPaging>) -> Result<PageView<String>> {
    let items: Vec<String> = PROJECTS
        .iter()
        .skip(request.offset() as usize)
        .take(request.per_page() as usize)
        .map(|name| name.to_string())
        .collect();

    let base_url = "http://localhost/projects";
    let position = PositionView::new(
        &request,
        items.len() as i64,
        PROJECTS.len() as i64,
        base_url,
    )?;
    let meta = MetaDataView::builder()
        .set_href(request.apply_url_query(base_url))
        .add_allow([HttpMethod::Get, HttpMethod::Post])
        .build()?;

    Ok(PageView::new(items, position, meta))
}

async fn broken_count() -> Result<PageView<String>> {
    let request = PageRequest::new(0, 2, "name asc")?;
    let position = PositionView::new(&request, 3, 2, "http://localhost/broken")?;
    Ok(PageView::new(Vec::new(), position, MetaDataView::default()))
}

fn app() -> Router {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/broken", get(broken_count))
}

async fn send(uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let link = response
        .headers()
        .get(header::LINK)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap();

    (status, link, json)
}

#[tokio::test]
async fn first_page_uses_defaults() {
    let (status, link, body) = send("/projects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], serde_json::json!(["apollo", "gemini"]));

    let position = &body["_position"];
    assert_eq!(position["index"], 0);
    assert_eq!(position["lastIndex"], 2);
    assert_eq!(position["totalElements"], 5);
    assert!(position.get("firstPage").is_none());
    assert!(position.get("previousPage").is_none());
    assert_eq!(
        position["nextPage"],
        "http://localhost/projects?page=1&per_page=2&sort=name+asc"
    );
    assert_eq!(
        position["lastPage"],
        "http://localhost/projects?page=2&per_page=2&sort=name+asc"
    );

    let meta = &body["_meta"];
    assert_eq!(
        meta["href"],
        "http://localhost/projects?page=0&per_page=2&sort=name+asc"
    );
    assert_eq!(meta["allow"], serde_json::json!(["GET", "POST"]));
    assert!(meta.get("links").is_none());

    let link = link.unwrap();
    assert!(link.contains("rel=\"next\""));
    assert!(link.contains("rel=\"last\""));
    assert!(!link.contains("rel=\"first\""));
}

#[tokio::test]
async fn last_page_links_backwards() {
    let (status, link, body) = send("/projects?page=2&sort=name+desc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], serde_json::json!(["voyager"]));

    let position = &body["_position"];
    assert_eq!(position["index"], 2);
    assert_eq!(
        position["firstPage"],
        "http://localhost/projects?page=0&per_page=2&sort=name+desc"
    );
    assert_eq!(
        position["previousPage"],
        "http://localhost/projects?page=1&per_page=2&sort=name+desc"
    );
    assert!(position.get("nextPage").is_none());
    assert!(position.get("lastPage").is_none());

    let link = link.unwrap();
    assert!(link.starts_with("<http://localhost/projects?page=0&per_page=2&sort=name+desc>; rel=\"first\""));
    assert!(!link.contains("rel=\"next\""));
}

#[tokio::test]
async fn single_page_has_no_link_header() {
    let (status, link, body) = send("/projects?per_page=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["_position"]["lastIndex"], 0);
    assert!(link.is_none());
}

#[tokio::test]
async fn malformed_paging_is_bad_request() {
    for uri in [
        "/projects?per_page=nan",
        "/projects?per_page=0",
        "/projects?page=-1",
        "/projects?page=nan",
        "/projects?sort=+",
    ] {
        let (status, _, body) = send(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "INVALID_PAGING_ARGUMENT", "{uri}");
        assert_eq!(body["status"], 400, "{uri}");
    }
}

#[tokio::test]
async fn inconsistent_counts_are_server_errors() {
    let (status, _, body) = send("/broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PRECONDITION_FAILED");
}
