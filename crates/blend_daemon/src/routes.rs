use crate::state::AppState;
use crate::tools::{self, ListToolArgs, ToolError};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

const NOT_RELOADABLE: &str = "serving the built-in catalog (started without --content-dir)";

#[cfg(test)]
pub fn make_router(state: AppState) -> anyhow::Result<Router> {
    make_router_with_cors(state, "http://localhost:5173")
}

pub fn make_router_with_cors(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let origin = cors_origin
        .parse::<axum::http::HeaderValue>()
        .map_err(|err| anyhow::anyhow!("invalid CORS origin '{cors_origin}': {err}"))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Ok(Router::new()
        .route("/api/v1/meta", get(meta_handler))
        .route("/api/v1/containers", get(containers_handler))
        .route("/api/v1/tools/:name", post(tool_handler))
        .route("/api/v1/catalog/reload", post(reload_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn meta_handler(State(app_state): State<AppState>) -> Json<Value> {
    let catalog = app_state.catalog();
    Json(serde_json::json!({
        "content_version": catalog.content_version(),
        "containers": catalog.containers().len(),
        "wick_brackets": catalog.wick_brackets().len(),
        "tools": tools::TOOL_NAMES,
        "reloadable": app_state.content_dir.is_some(),
    }))
}

pub async fn containers_handler(
    State(app_state): State<AppState>,
    Query(args): Query<ListToolArgs>,
) -> (StatusCode, Json<Value>) {
    let catalog = app_state.catalog();
    match tools::list_tool(&catalog, &args) {
        Ok(result) => match serde_json::to_value(result) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(err) => tool_error_response("list_containers", &ToolError::from(err)),
        },
        Err(err) => tool_error_response("list_containers", &err),
    }
}

pub async fn tool_handler(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let args = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(err) => return tool_error_response(&name, &ToolError::from(err)),
        }
    };
    let catalog = app_state.catalog();
    match tools::dispatch(&catalog, &name, args) {
        Ok(result) => {
            tracing::debug!(tool = %name, "tool call succeeded");
            (StatusCode::OK, Json(result))
        }
        Err(err) => tool_error_response(&name, &err),
    }
}

fn tool_error_response(tool: &str, err: &ToolError) -> (StatusCode, Json<Value>) {
    let status = match err {
        ToolError::UnknownTool(_) => StatusCode::NOT_FOUND,
        ToolError::Arguments(_) | ToolError::Schema(_) | ToolError::InvalidInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    tracing::info!(tool, %err, "tool call rejected");
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

pub async fn reload_handler(State(app_state): State<AppState>) -> (StatusCode, Json<Value>) {
    let Some(dir) = app_state.content_dir.clone() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": NOT_RELOADABLE })),
        );
    };

    let loaded = tokio::task::spawn_blocking(move || blend_content::load_catalog(&dir)).await;
    match loaded {
        Ok(Ok(catalog)) => {
            let content_version = catalog.content_version().to_string();
            let previous = app_state.swap_catalog(catalog);
            tracing::info!(
                from = previous.content_version(),
                to = %content_version,
                "catalog reloaded"
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({"content_version": content_version})),
            )
        }
        Ok(Err(err)) => {
            tracing::warn!("catalog reload failed: {err:#}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"error": format!("{err:#}")})),
            )
        }
        Err(err) => {
            tracing::error!("catalog reload task failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "reload task failed"})),
            )
        }
    }
}
