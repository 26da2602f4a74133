pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::share::handlers as share;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/analyze", post(analysis::handle_analyze))
        .route("/analyze/text", post(analysis::handle_analyze_text))
        // Sharing
        .route("/analysis", post(share::handle_share))
        .route("/analysis/:id", get(share::handle_get_shared))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::orchestrator::Analyzer;
    use crate::config::Config;
    use crate::extractor::TextExtractor;
    use crate::llm_client::{CompletionProvider, LlmError};
    use crate::share::MemoryShareStore;

    const COMPLETION: &str = "SCORE: 85%\n\
        MISSING: Kubernetes, Terraform\n\
        SUMMARY: Strong backend profile with solid Rust experience and production ownership.\n\
        FEEDBACK: Add a bullet about container orchestration.\n\
        SEARCH_QUERY: Senior Rust Engineer";

    const RESUME: &str = "Backend engineer with six years of Rust, PostgreSQL and AWS experience in production.";
    const JOB_DESCRIPTION: &str = "Senior Rust engineer, Kubernetes and Terraform required.";

    struct CannedProvider;

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(COMPLETION.to_string())
        }

        fn model(&self) -> &str {
            "canned-model"
        }
    }

    struct CannedExtractor;

    #[async_trait]
    impl TextExtractor for CannedExtractor {
        async fn extract(&self, document: Bytes) -> String {
            if document.is_empty() {
                String::new()
            } else {
                RESUME.to_string()
            }
        }
    }

    fn test_state() -> AppState {
        let config = Config::default();
        AppState {
            analyzer: Arc::new(Analyzer::new(
                Arc::new(CannedProvider),
                Arc::new(CannedExtractor),
                config.input_limits,
                Duration::from_secs(5),
            )),
            shares: Arc::new(MemoryShareStore::new()),
            config,
        }
    }

    async fn send(state: &AppState, request: Request<Body>) -> Response {
        build_router(state.clone()).oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(fields: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let boundary = "jobalign-test-boundary";
        let mut body = String::new();
        for (name, filename, value) in fields {
            body.push_str(&format!("--{boundary}\r\n"));
            match filename {
                Some(file) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\nContent-Type: application/pdf\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::post("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_reports_ok() {
        let state = test_state();
        let response = send(&state, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "OK" }));
    }

    #[tokio::test]
    async fn test_health_reports_provider_and_store() {
        let state = test_state();
        let response = send(&state, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["providerConfigured"], false);
        assert_eq!(body["model"], "canned-model");
        assert_eq!(body["shareStore"], "memory");
    }

    #[tokio::test]
    async fn test_analyze_text_returns_parsed_result() {
        let state = test_state();
        let response = send(
            &state,
            post_json(
                "/analyze/text",
                json!({ "resumeText": RESUME, "jobDescription": JOB_DESCRIPTION }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["matchScore"], 85);
        assert_eq!(body["missingKeywords"], json!(["Kubernetes", "Terraform"]));
        assert_eq!(body["searchQuery"], "Senior Rust Engineer");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_text_short_input_is_unprocessable() {
        let state = test_state();
        let response = send(
            &state,
            post_json(
                "/analyze/text",
                json!({ "resumeText": "too short", "jobDescription": JOB_DESCRIPTION }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["matchScore"], 0);
        assert_eq!(body["missingKeywords"], json!(["Input too short"]));
    }

    #[tokio::test]
    async fn test_analyze_upload_extracts_and_analyzes() {
        let state = test_state();
        let response = send(
            &state,
            multipart_request(&[
                ("resume", Some("cv.pdf"), "%PDF-1.4 placeholder"),
                ("jobDesc", None, JOB_DESCRIPTION),
            ]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["matchScore"], 85);
    }

    #[tokio::test]
    async fn test_analyze_upload_accepts_job_description_field_name() {
        let state = test_state();
        let response = send(
            &state,
            multipart_request(&[
                ("jobDescription", None, JOB_DESCRIPTION),
                ("resume", Some("cv.pdf"), "%PDF-1.4 placeholder"),
            ]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analyze_upload_without_file_is_rejected_result() {
        let state = test_state();
        let response = send(
            &state,
            multipart_request(&[("jobDesc", None, JOB_DESCRIPTION)]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["matchScore"], 0);
        assert_eq!(body["missingKeywords"], json!(["Input too short"]));
    }

    #[tokio::test]
    async fn test_share_then_fetch() {
        let state = test_state();
        let analyzed = json_body(
            send(
                &state,
                post_json(
                    "/analyze/text",
                    json!({ "resumeText": RESUME, "jobDescription": JOB_DESCRIPTION }),
                ),
            )
            .await,
        )
        .await;

        let created = send(&state, post_json("/analysis", analyzed.clone())).await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let id = json_body(created).await["id"]
            .as_str()
            .unwrap()
            .to_string();

        let fetched = send(
            &state,
            Request::get(format!("/analysis/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(fetched.status(), StatusCode::OK);

        let record = json_body(fetched).await;
        assert_eq!(record["id"], id.as_str());
        assert_eq!(record["result"], analyzed);
        assert!(record["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_fetch_unknown_share_is_not_found() {
        let state = test_state();
        let response = send(
            &state,
            Request::get("/analysis/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_share_rejects_out_of_range_score() {
        let state = test_state();
        let response = send(
            &state,
            post_json(
                "/analysis",
                json!({
                    "matchScore": 150,
                    "missingKeywords": ["Go"],
                    "summary": "s",
                    "feedback": "f",
                    "searchQuery": "q"
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
