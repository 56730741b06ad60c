mod session;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use session::{decode, EndRequest, Sessions, StartRequest, UpdateRequest};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

type AppState = Arc<Sessions>;

/// Any failure while handling a request ends up as a 400 with the error chain in the body.
struct AppError(color_eyre::Report);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("Rejected request: {:#}", self.0);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("{:#}", self.0)})),
        )
            .into_response()
    }
}

impl<E: Into<color_eyre::Report>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn info() -> Json<Value> {
    Json(json!({
        "apiversion": "1",
        "author": "Nereuxofficial",
        "name": "hydra",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn start(State(sessions): State<AppState>, body: String) -> Result<StatusCode, AppError> {
    let request: StartRequest = decode(body)?;
    sessions.start(request)?;
    Ok(StatusCode::OK)
}

async fn update(
    State(sessions): State<AppState>,
    body: String,
) -> Result<Json<Value>, AppError> {
    let request: UpdateRequest = decode(body)?;
    let actions = sessions.update(request)?;
    Ok(Json(json!({ "actions": actions })))
}

async fn end(State(sessions): State<AppState>, body: String) -> Result<Json<Value>, AppError> {
    let request: EndRequest = decode(body)?;
    let saved = sessions.end(request)?;
    Ok(Json(json!({ "saved_snakes": saved })))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(sentry_tracing::layer());
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        Ok("tree") => registry
            .with(tracing_tree::HierarchicalLayer::new(2))
            .init(),
        _ => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
    }
}

fn app(sessions: AppState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/info", get(info))
        .route("/start", post(start))
        .route("/update", post(update))
        .route("/end", post(end))
        .with_state(sessions)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });
    init_tracing();
    info!("Hello Snakes!");

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("Listening on port {port}");
    axum::serve(listener, app(Arc::new(Sessions::default()))).await?;
    Ok(())
}
