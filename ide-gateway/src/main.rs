//! Entry point for the `ide-gateway` HTTP server.

use ide_gateway::{config::GatewayConfig, routes::create_router, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let base = match config.load_base() {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(path = %config.base_config_path.display(), error = %e, "failed to load base configuration");
            std::process::exit(1);
        }
    };

    let app = create_router(AppState::from_config(base, &config));

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, profiles = %config.profile_dir.display(), "ide-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
