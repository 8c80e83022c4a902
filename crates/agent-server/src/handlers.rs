//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use blog_writer::{BlogError, EditBlog, StoredBlog};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_provider: String,
    pub provider_connected: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// A pipeline error on its way out as JSON
pub struct ApiError(BlogError);

impl From<BlogError> for ApiError {
    fn from(err: BlogError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(BlogError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.code(), "Request failed");
        } else {
            tracing::warn!(error = %self.0, code = self.0.code(), "Request rejected");
        }

        let body = ErrorResponse {
            error: self.0.user_message(),
            code: self.0.code().into(),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_provider: state.provider.name().to_string(),
        provider_connected,
    })
}

/// `POST /blog/generateFromPrompt`
pub async fn generate_from_prompt(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredBlog>), ApiError> {
    let Json(body) = payload?;
    let prompt = match body.get("prompt") {
        Some(Value::String(prompt)) if !prompt.trim().is_empty() => prompt.clone(),
        Some(Value::String(_)) => return Err(BlogError::Validation("prompt should not be empty".into()).into()),
        Some(_) => return Err(BlogError::Validation("prompt must be a string".into()).into()),
        None => return Err(BlogError::Validation("prompt is required".into()).into()),
    };

    tracing::info!(chars = prompt.len(), "Generating blog");
    let blog = state.pipeline.generate(&prompt).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// `PATCH /blog/{blog_id}`
pub async fn edit_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StoredBlog>, ApiError> {
    let Json(body) = payload?;
    let edit = EditBlog::from_value(&body)?;

    let blog = state.pipeline.edit(&blog_id, edit).await?;
    Ok(Json(blog))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use agent_core::mock::ScriptedProvider;
    use agent_core::provider::Completion;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use blog_writer::{AgentContext, BlogPipeline, BlogSettings, BlogStore, Integrations, MemoryBlogStore};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    fn test_app(script: Vec<Completion>) -> (axum::Router, Arc<MemoryBlogStore>) {
        let provider = Arc::new(ScriptedProvider::from_completions(script));
        let store = Arc::new(MemoryBlogStore::new());
        let ctx = AgentContext::new(provider.clone(), BlogSettings::default());
        let pipeline = BlogPipeline::new(&ctx, Integrations::mock(), store.clone()).unwrap();
        let state = AppState {
            pipeline: Arc::new(pipeline),
            provider,
        };
        (crate::build_router(state), store)
    }

    fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn document() -> String {
        json!({"title": "Glaciers", "blocks": [{"type": "text", "text": "Ice moves."}]}).to_string()
    }

    #[tokio::test]
    async fn test_generate_created() {
        let (app, store) = test_app(vec![
            Completion::text("m", "research"),
            Completion::text("m", document()),
            Completion::text("m", document()),
        ]);

        let response = app
            .oneshot(json_request(Method::POST, "/blog/generateFromPrompt", &json!({"prompt": "glaciers"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["title"], "Glaciers");
        assert_eq!(body["status"], "draft");
        assert_eq!(body["content"][0]["type"], "text");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_generate_requires_prompt() {
        for body in [json!({}), json!({"prompt": "  "}), json!({"prompt": 7})] {
            let (app, _) = test_app(vec![]);
            let response = app
                .oneshot(json_request(Method::POST, "/blog/generateFromPrompt", &body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(read_json(response).await["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_generate_formatting_failure_is_422() {
        let (app, store) = test_app(vec![
            Completion::text("m", "research"),
            Completion::text("m", "draft"),
            Completion::text("m", "no json here"),
        ]);

        let response = app
            .oneshot(json_request(Method::POST, "/blog/generateFromPrompt", &json!({"prompt": "x"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(read_json(response).await["code"], "FORMATTING_ERROR");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_edit_blog() {
        let (app, store) = test_app(vec![]);
        let blog = store
            .create(blog_writer::NewBlog::draft(
                "user123",
                blog_writer::BlogDocument {
                    title: "Old".into(),
                    blocks: vec![blog_writer::ContentBlock::text("old")],
                },
            ))
            .await
            .unwrap();

        let uri = format!("/blog/{}", blog.id);
        let body = json!({
            "title": "New",
            "content": [{"type": "image", "image": "https://img/x.jpg", "imageAlt": "X"}]
        });
        let response = app
            .clone()
            .oneshot(json_request(Method::PATCH, &uri, &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["title"], "New");
        assert_eq!(json["content"][0]["imageAlt"], "X");

        let invalid = json!({"title": "New", "content": [{"type": "image", "image": "https://img/x.jpg"}]});
        let response = app.oneshot(json_request(Method::PATCH, &uri, &invalid)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_edit_unknown_blog_is_404() {
        let (app, _) = test_app(vec![]);
        let body = json!({"title": "New", "content": []});
        let response = app
            .oneshot(json_request(Method::PATCH, "/blog/does-not-exist", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app(vec![]);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["model_provider"], "scripted");
        assert_eq!(json["provider_connected"], true);
    }
}
