//! Request helpers shared by route tests.

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;

use crate::routes;
use crate::state::AppState;

pub const PUBLIC_URL: &str = "http://localhost:8000";

pub fn app(pkg_dir: &Path) -> Router {
    routes::app(AppState::new(pkg_dir.to_path_buf(), "http://localhost:8000/", "demo-shop".into()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse { status, headers, body: String::from_utf8_lossy(&bytes).into_owned() }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, request).await
}
