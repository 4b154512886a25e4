use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use trip_service::core::{Config, logging};
use trip_service::repositories::MySqlStore;
use trip_service::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Config::from_env()?;
    config.print_info();

    let store = MySqlStore::connect(&config).await?;
    let state = Arc::new(
        AppState::new(Arc::new(store)).with_default_page_size(config.default_page_size),
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
