use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::ValidationError;
use crate::evaluator::{AnalysisRequest, ScoreResult};

const INDEX_HTML: &str = include_str!("../assets/index.html");

pub enum ApiError {
    Validation(ValidationError),
    MethodNotAllowed,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Invalid request method".to_owned(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router() -> Router {
    let analyze_route = post(analyze).fallback(method_not_allowed);

    Router::new()
        .route("/", get(index))
        .route("/analyze/", analyze_route.clone())
        .route("/analyze", analyze_route)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn analyze(body: Bytes) -> Result<Json<ScoreResult>, ApiError> {
    let request = parse_request(&body).inspect_err(|err| {
        if let ValidationError::MalformedRequestEnvelope { reason } = err {
            warn!(%reason, "rejected analyze request");
        }
    })?;

    let result = request.evaluate().inspect_err(|err| {
        warn!(%err, "rejected analyze request");
    })?;

    info!(score = result.score, findings = result.details.len(), "analyzed url");
    Ok(Json(result))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Decodes a request body. Anything other than a JSON object whose `url`
/// is a string, null or absent is a malformed envelope.
pub fn parse_request(body: &[u8]) -> Result<AnalysisRequest, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ValidationError::malformed("request body is not a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| ValidationError::malformed(e.to_string()))
}

pub async fn serve(config: &ServerConfig) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("🛑 Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("⚠️ Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn read_body(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_json(path: &str, body: &str) -> Response {
        router()
            .oneshot(
                Request::post(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_returns_score_and_details() {
        let resp = post_json("/analyze/", r#"{"url": "http://bit.ly/x"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_body(resp).await;
        assert_eq!(body["score"], 55);
        assert_eq!(
            body["details"],
            json!([
                "Connection is not secure (no HTTPS).",
                "Uses a URL shortener, which can hide the final destination."
            ])
        );
    }

    #[tokio::test]
    async fn test_analyze_without_trailing_slash() {
        let resp = post_json("/analyze", r#"{"url": "https://example.com"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["score"], 0);
    }

    #[tokio::test]
    async fn test_missing_url() {
        for body in [r#"{}"#, r#"{"url": ""}"#, r#"{"url": null}"#] {
            let resp = post_json("/analyze/", body).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(read_body(resp).await, json!({ "error": "URL not provided" }));
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        for body in ["not json", r#"["http://bit.ly"]"#, r#"{"url": 42}"#, ""] {
            let resp = post_json("/analyze/", body).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(
                read_body(resp).await,
                json!({ "error": "Invalid request format" })
            );
        }
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let resp = router()
            .oneshot(Request::get("/analyze/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            read_body(resp).await,
            json!({ "error": "Invalid request method" })
        );
    }

    #[tokio::test]
    async fn test_index_page() {
        let resp = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("/analyze/"));
    }

    #[test]
    fn test_parse_request_ignores_unknown_fields() {
        let request = parse_request(br#"{"url": "https://a.b", "extra": true}"#).unwrap();
        assert_eq!(request, AnalysisRequest::new("https://a.b"));
    }
}
