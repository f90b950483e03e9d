//! The inbound answer contract: always 200, always a non-empty answer body.

use crate::AppState;
use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub(crate) struct AnswerRequest {
    question: String,
    /// "bachelor" | "master"; anything else falls back to the default index.
    level: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct AnswerResponse {
    answer: String,
}

pub(crate) async fn answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Json<AnswerResponse> {
    let answer = state
        .pipeline
        .answer_question(&req.question, req.level.as_deref())
        .await;
    Json(AnswerResponse { answer })
}

pub(crate) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use crate::app;
    use abit_core::{
        fallback, AnswerPipeline, IndexStore, LlmClient, MockLlm, PassageRecord, PipelineConfig,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(root: &std::path::Path) -> axum::Router {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::default());
        let pipeline = Arc::new(AnswerPipeline::with_pipeline_config(
            root.to_string_lossy().into_owned(),
            PipelineConfig::default(),
            llm,
        ));
        app(pipeline)
    }

    fn seed_default_index(root: &std::path::Path) {
        let store = IndexStore::open_path(root.join("knowledge_index")).unwrap();
        store
            .append(&PassageRecord::new(
                "Приём документов открыт с 20 июня по 25 июля.",
                "faq.json",
                vec![1.0; 8],
            ))
            .unwrap();
        store.flush().unwrap();
    }

    async fn post_answer(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/v1/answer")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn answers_are_always_200_with_text() {
        let root = tempfile::tempdir().unwrap();
        seed_default_index(root.path());
        let (status, json) = post_answer(
            test_app(root.path()),
            serde_json::json!({ "question": "Какие документы нужны для поступления?" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let answer = json["answer"].as_str().unwrap();
        assert!(!answer.is_empty());
    }

    #[tokio::test]
    async fn missing_index_folds_into_friendly_answer() {
        let root = tempfile::tempdir().unwrap();
        let (status, json) = post_answer(
            test_app(root.path()),
            serde_json::json!({ "question": "Какие документы нужны?", "level": "master" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["answer"], fallback::INDEX_UNAVAILABLE);
    }

    #[tokio::test]
    async fn overlong_question_is_bounced_by_the_pipeline() {
        let root = tempfile::tempdir().unwrap();
        let (status, json) = post_answer(
            test_app(root.path()),
            serde_json::json!({ "question": "б".repeat(501) }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["answer"], fallback::length_exceeded(500));
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let root = tempfile::tempdir().unwrap();
        let req = Request::builder()
            .method("GET")
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let res = test_app(root.path()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
