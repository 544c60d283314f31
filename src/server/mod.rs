use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub mod routes;

/// Server state.
///
/// Only the database path is shared; every handler opens its own store
/// for the duration of one request.
pub struct AppState {
    pub database_path: PathBuf,
}

pub async fn start_server(port: u16, database_path: PathBuf) -> anyhow::Result<()> {
    let state = Arc::new(AppState { database_path });

    let app = Router::new()
        .route("/books", get(routes::list_books).post(routes::create_book))
        .route(
            "/books/{id}",
            get(routes::get_book)
                .put(routes::replace_book)
                .delete(routes::delete_book),
        )
        .route("/books/{id}/cover", get(routes::get_cover))
        .route("/import", post(routes::import_csv))
        .fallback_service(ServeDir::new("ui"))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Catalog UI at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
