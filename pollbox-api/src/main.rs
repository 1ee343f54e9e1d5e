mod extract;
mod handlers;

use axum::routing::{get, post};
use axum::Router;
use pollbox_app::AppContext;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let ctx = AppContext::from_env()
        .await
        .expect("Failed to connect to database");

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(24)));

    let app = Router::new()
        .route(
            "/api/auth/session",
            post(handlers::create_session).delete(handlers::delete_session),
        )
        .route("/api/polls", post(handlers::create_poll))
        .route("/api/polls/{id}", get(handlers::get_poll))
        .route("/api/polls/{id}/results", get(handlers::get_poll_results))
        .route("/api/votes", post(handlers::submit_vote))
        .route("/api/users/me/polls", get(handlers::my_polls))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    tracing::info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
