//! Axum application setup.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Sentence navigation
        .route("/sentence", get(handlers::get_sentence))
        .route("/sentence/next", post(handlers::next_sentence))
        .route("/sentence/previous", post(handlers::previous_sentence))
        // Candidate generation
        .route("/translate", post(handlers::translate))
        .route("/save_translation", post(handlers::save_translation))
        // Review session
        .route("/session", get(handlers::get_session))
        .route("/session/items/:index/edit", post(handlers::start_edit))
        .route("/session/items/:index/cancel", post(handlers::cancel_edit))
        .route("/session/items/:index/buffer", put(handlers::update_buffer))
        .route("/session/items/:index/commit", post(handlers::commit_item))
        .route("/notifications", get(handlers::take_notifications))
        // Instructions
        .route("/prompt", get(handlers::get_prompt).put(handlers::set_prompt));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(cors)
        .with_state(state)
}

/// Start the web server; stops on Ctrl+C.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!(%addr, "review server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
