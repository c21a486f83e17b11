pub mod api;
pub mod config;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;
pub use api::{ApiError, ErrorResponse};

// Export all model types
pub use model::*;

// Export store types
pub use store::{AnnotationStore, ExampleStore, FileStore, Store};

use std::sync::Arc;
use tokio::net::TcpListener;

/// Prepare storage from `config`, bind and serve until the process ends.
pub async fn run_server(config: &crate::config::AppConfig) -> anyhow::Result<()> {
    let store = Arc::new(FileStore::open(&config.storage)?);
    let app = routes::create_app(store, config)?;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Server starting on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
