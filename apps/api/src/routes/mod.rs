pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form page
        .route("/", get(handlers::handle_new_job_page))
        .route("/jobs/new", get(handlers::handle_new_job_page))
        // Jobs API
        .route("/api/jobs", post(handlers::handle_create_job))
        .route("/api/jobs/extract", post(handlers::handle_extract))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::models::job::JobRecord;
    use crate::sheets::testing::RecordingAppender;

    fn app(appender: Arc<RecordingAppender>) -> Router {
        build_router(AppState { appender })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_form_page_is_html() {
        let response = app(Arc::default())
            .oneshot(Request::get("/jobs/new").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_extract_returns_merged_form() {
        let (status, body) = post_json(
            app(Arc::default()),
            "/api/jobs/extract",
            json!({
                "jd_text": "We are hiring for Senior Data Analyst at Initech Solutions. 2+ years required.",
                "form": {"responded": "referral from Sam"}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["fields"]["role"], "Senior Data Analyst");
        assert!(body["fields"].get("link").is_none());
        assert_eq!(body["form"]["company"], "Initech Solutions");
        assert_eq!(body["form"]["yoe"], "2");
        assert_eq!(body["form"]["responded"], "referral from Sam");
        assert_eq!(
            body["status"]["message"],
            "Auto-filled fields from JD. Please review and edit if needed."
        );
    }

    #[tokio::test]
    async fn test_extract_blank_text_is_rejected() {
        let (status, body) =
            post_json(app(Arc::default()), "/api/jobs/extract", json!({"jd_text": "   "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"ok": false, "error": "Paste a job description first."})
        );
    }

    #[tokio::test]
    async fn test_create_job_appends_one_row() {
        let appender = Arc::new(RecordingAppender::default());
        let (status, body) = post_json(
            app(appender.clone()),
            "/api/jobs",
            json!({"company": "Acme Corp", "role": "SRE", "appliedDate": "2024-05-01"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(
            appender.rows(),
            vec![JobRecord {
                company: "Acme Corp".to_string(),
                role: "SRE".to_string(),
                applied_date: "2024-05-01".to_string(),
                ..Default::default()
            }]
        );
    }

    #[tokio::test]
    async fn test_create_job_without_company_is_rejected() {
        let appender = Arc::new(RecordingAppender::default());
        let (status, body) =
            post_json(app(appender.clone()), "/api/jobs", json!({"role": "SRE"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"ok": false, "error": "Company is required."}));
        assert!(appender.rows().is_empty());
    }

    #[tokio::test]
    async fn test_create_job_failure_is_single_message() {
        let appender = Arc::new(RecordingAppender::failing("quota exceeded"));
        let (status, body) =
            post_json(app(appender), "/api/jobs", json!({"company": "Acme"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"ok": false, "error": "Sheets API error (status 503): quota exceeded"})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_gets_error_body() {
        let response = app(Arc::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/jobs")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
}
