use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use humanize::synonyms::{MockMode, MockSynonymSource, SynonymSource, WordsApiProvider};
use humanize::{
    BatchOutcome, HumanizeConfig, HumanizeError, Humanizer, Intensity, RewriteRequest,
    RewriteResult, Style,
};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Success envelope
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T, message: Option<&str>) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            message: message.map(str::to_string),
            timestamp: timestamp(),
        })
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// Error envelope
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
    pub timestamp: String,
}

pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn validation(message: &str, details: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                code: "VALIDATION_ERROR".to_string(),
                message: message.to_string(),
                details,
            },
        }
    }

    /// Map a pipeline error; internal messages are only shown when `expose` is set
    fn from_pipeline(err: HumanizeError, expose: bool) -> Self {
        let code = err.code().to_string();
        if err.is_input_error() {
            return Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    code,
                    message: err.to_string(),
                    details: Vec::new(),
                },
            };
        }

        warn!(code = %code, error = %err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                code,
                message: "Failed to humanize text".to_string(),
                details: if expose { vec![err.to_string()] } else { Vec::new() },
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("Invalid request body", vec![rejection.body_text()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.body,
            timestamp: timestamp(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
}

#[derive(Serialize)]
pub struct BatchData {
    #[serde(flatten)]
    pub outcome: BatchOutcome,
    pub successful: usize,
}

#[derive(Serialize)]
pub struct CatalogueEntry {
    pub id: &'static str,
    pub name: String,
    pub description: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsInfo {
    pub min_length: usize,
    pub max_length: usize,
    pub batch_max_items: usize,
}

#[derive(Serialize)]
pub struct StylesData {
    pub styles: Vec<CatalogueEntry>,
    pub intensities: Vec<CatalogueEntry>,
    pub limits: LimitsInfo,
}

#[derive(Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
    pub source: String,
}

#[derive(Clone)]
pub struct AppState {
    pub humanizer: Arc<Humanizer>,
    pub source_name: String,
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/humanize", post(humanize_text))
        .route("/api/humanize/batch", post(humanize_batch))
        .route("/api/humanize/styles", get(available_styles))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn build_state() -> Result<AppState, Box<dyn std::error::Error>> {
    let config = match std::env::var("HUMANIZE_CONFIG") {
        Ok(path) => HumanizeConfig::from_file(std::path::Path::new(&path))?,
        Err(_) => HumanizeConfig::default(),
    };
    let config = config.apply_env()?;

    let source: Arc<dyn SynonymSource> = if config.lookup.api_key.is_some() {
        Arc::new(
            WordsApiProvider::from_config(&config.lookup)
                .map_err(|e| format!("Failed to initialize synonym source: {}", e))?,
        )
    } else {
        warn!("WORDS_API_KEY not set, word substitution is disabled");
        Arc::new(MockSynonymSource::new(MockMode::Empty))
    };
    let source_name = source.source_name().to_string();

    Ok(AppState {
        humanizer: Arc::new(Humanizer::new(config, source)?),
        source_name,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = build_state()?;
    info!(source = %state.source_name, "✍️  Starting humanize web server");

    let addr = std::env::var("HUMANIZE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn humanize_text(
    State(state): State<AppState>,
    payload: Result<Json<RewriteRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RewriteResult>>, ApiError> {
    let Json(request) = payload?;
    let expose = state.humanizer.config().expose_error_details;

    let result = state
        .humanizer
        .humanize(&request)
        .await
        .map_err(|e| ApiError::from_pipeline(e, expose))?;

    Ok(ApiResponse::ok(result, Some("Text humanized successfully")))
}

async fn humanize_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchData>>, ApiError> {
    let Json(request) = payload?;
    let expose = state.humanizer.config().expose_error_details;
    info!(items = request.texts.len(), "batch request");

    let outcome = state
        .humanizer
        .humanize_batch(&request.texts, request.style, request.intensity)
        .await
        .map_err(|e| ApiError::from_pipeline(e, expose))?;
    let successful = outcome.results.len();

    Ok(ApiResponse::ok(BatchData { outcome, successful }, None))
}

async fn available_styles(State(state): State<AppState>) -> Json<ApiResponse<StylesData>> {
    let limits = &state.humanizer.config().limits;
    let data = StylesData {
        styles: Style::ALL
            .iter()
            .map(|s| CatalogueEntry {
                id: s.as_str(),
                name: title_case(s.as_str()),
                description: s.description(),
            })
            .collect(),
        intensities: Intensity::ALL
            .iter()
            .map(|i| CatalogueEntry {
                id: i.as_str(),
                name: title_case(i.as_str()),
                description: i.description(),
            })
            .collect(),
        limits: LimitsInfo {
            min_length: limits.min_len,
            max_length: limits.max_len,
            batch_max_items: limits.max_batch_items,
        },
    };
    ApiResponse::ok(data, None)
}

async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    ApiResponse::ok(
        HealthData {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            source: state.source_name.clone(),
        },
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app(expose: bool) -> Router {
        let config = HumanizeConfig {
            expose_error_details: expose,
            seed: Some(1),
            ..HumanizeConfig::default()
        };
        let source = Arc::new(MockSynonymSource::new(MockMode::Empty));
        app(AppState {
            humanizer: Arc::new(Humanizer::new(config, source).unwrap()),
            source_name: "Mock Synonyms".to_string(),
        })
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_humanize_success_envelope() {
        let (status, body) = send(
            test_app(false),
            "POST",
            "/api/humanize",
            Some(json!({ "text": "Furthermore, the plan is very good.", "style": "casual" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["humanizedText"], "Also, the plan is really good.");
        assert_eq!(body["data"]["style"], "casual");
        assert_eq!(body["data"]["intensity"], "aggressive");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_humanize_too_short() {
        let (status, body) = send(
            test_app(false),
            "POST",
            "/api/humanize",
            Some(json!({ "text": "tiny" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "TEXT_TOO_SHORT");
    }

    #[tokio::test]
    async fn test_humanize_invalid_style() {
        let (status, body) = send(
            test_app(false),
            "POST",
            "/api/humanize",
            Some(json!({ "text": "A perfectly fine sentence.", "style": "shouty" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["details"].is_array());
    }

    #[tokio::test]
    async fn test_batch_partial_failure() {
        let (status, body) = send(
            test_app(false),
            "POST",
            "/api/humanize/batch",
            Some(json!({ "texts": ["The plan is very good.", "tiny"] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["successful"], 1);
        assert_eq!(body["data"]["failed"][0]["index"], 1);
        assert_eq!(body["data"]["failed"][0]["code"], "TEXT_TOO_SHORT");
    }

    #[tokio::test]
    async fn test_batch_too_large() {
        let texts: Vec<&str> = vec!["The plan is very good."; 11];
        let (status, body) = send(
            test_app(false),
            "POST",
            "/api/humanize/batch",
            Some(json!({ "texts": texts })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_styles_catalogue() {
        let (status, body) = send(test_app(false), "GET", "/api/humanize/styles", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["styles"].as_array().unwrap().len(), 4);
        assert_eq!(body["data"]["intensities"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["styles"][0]["id"], "academic");
        assert_eq!(body["data"]["styles"][0]["name"], "Academic");
        assert_eq!(body["data"]["limits"]["minLength"], 10);
        assert_eq!(body["data"]["limits"]["batchMaxItems"], 10);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_app(false), "GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["source"], "Mock Synonyms");
    }

    #[test]
    fn test_processing_details_hidden_unless_exposed() {
        let err = HumanizeError::Processing {
            message: "task panicked".to_string(),
            original_text: "input".to_string(),
        };
        let hidden = ApiError::from_pipeline(err.clone(), false);
        assert_eq!(hidden.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hidden.body.code, "PROCESSING_ERROR");
        assert!(hidden.body.details.is_empty());

        let shown = ApiError::from_pipeline(err, true);
        assert_eq!(shown.body.details.len(), 1);
        assert!(shown.body.details[0].contains("task panicked"));
    }
}
