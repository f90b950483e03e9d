//! Axum-based API gateway: HTTP entry point for the admission assistant.

mod handlers;

use abit_core::{client_from_config, AnswerPipeline, CoreConfig};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pipeline: Arc<AnswerPipeline>,
}

pub(crate) fn app(pipeline: Arc<AnswerPipeline>) -> Router {
    Router::new()
        .route("/v1/answer", post(handlers::answer))
        .route("/healthz", get(handlers::healthz))
        .with_state(AppState { pipeline })
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match CoreConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        app = %config.app_name,
        llm_mode = %config.llm.mode,
        index_root = %config.index_root,
        "starting gateway"
    );

    let llm = client_from_config(&config.llm);
    let pipeline = Arc::new(AnswerPipeline::new(&config, llm));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("abit-gateway listening on {}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app(pipeline)).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
