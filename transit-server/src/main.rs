use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_server::config::ServerConfig;
use transit_server::loader::NetworkSpec;
use transit_server::network::TransitNetwork;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();

    let network = match &config.network_path {
        Some(path) => {
            let spec = NetworkSpec::load(path).expect("Failed to load network description");
            info!(path = %path.display(), "loaded network description");
            TransitNetwork::from_spec(&spec, config.engine.clone())
                .expect("Failed to build network")
        }
        None => TransitNetwork::new(config.engine.clone()),
    };

    let state = AppState::new(network);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("Failed to bind address");
    info!(addr = %config.bind, "transit server listening");

    axum::serve(listener, app).await.expect("Server error");
}
