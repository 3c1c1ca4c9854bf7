//! Page handlers

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::AppState;

/// GET / - Dashboard page; controls and charts are filled in client-side
pub async fn index() -> impl IntoResponse {
    let html = include_str!("../../static/index.html");
    Html(html)
}

/// GET /healthz - Liveness plus the loaded row count
pub async fn healthz(State(state): State<Arc<AppState>>) -> String {
    format!("ok {} cities\n", state.dataset.len())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use citydash::prelude::Variant;
    use tower::ServiceExt;

    use crate::test_support::state_for;

    #[tokio::test]
    async fn index_serves_the_page() {
        let response = crate::app(state_for(Variant::Checklist))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/ws/v1/compose"));
    }

    #[tokio::test]
    async fn healthz_reports_row_count() {
        let response = crate::app(state_for(Variant::Checklist))
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok 6 cities\n");
    }
}
