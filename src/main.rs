use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use interview_backend::{
    config::{get_config, init_config},
    middleware::cors::permissive_cors,
    routes,
    services::catalog_service::CatalogService,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let catalog = CatalogService::load_from_dir(Path::new(&config.questions_dir)).await;
    if catalog.is_empty() {
        tracing::warn!(
            dir = %config.questions_dir,
            "question catalog is empty; interview requests will get a fixed failure reply"
        );
    } else {
        info!(
            categories = catalog.categories().len(),
            questions = catalog.question_count(),
            "question catalog loaded"
        );
    }

    let app_state = AppState::new(Arc::new(catalog));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/chat", post(routes::chat::chat))
        .route("/models", get(routes::chat::list_models))
        .route("/start", get(routes::interview::start))
        .route("/sendmessage", post(routes::interview::send_message))
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
