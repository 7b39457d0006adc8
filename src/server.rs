use axum::{
    Extension, Router,
    routing::{get, options},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Error, Res, api, config, types::PkceToken, types::SelectionPolicy};

/// Settings shared by every request of the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    pub policy: SelectionPolicy,
    pub api_url: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", options(api::preflight))
        .route("/health", get(api::health))
        .route("/token", get(api::token))
        .route(
            "/{playlist_id}",
            get(api::get_playlist)
                .post(api::generate)
                .options(api::preflight),
        )
        .with_state(Arc::new(state))
}

/// Serves the deep cut HTTP API on `SERVER_ADDRESS` until the process stops.
pub async fn start_api_server(state: AppState) -> Res<()> {
    let listener = bind_listener(&config::server_addr()).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Serves only the OAuth callback on an already bound listener, for the
/// duration of `deepcut auth`.
pub async fn start_callback_server(
    listener: TcpListener,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    axum::serve(listener, app).await?;
    Ok(())
}

/// Parses `addr` and binds a listener on it.
///
/// # Errors
///
/// - [`Error::Config`] if `addr` is not a socket address
/// - [`Error::Io`] if the address cannot be bound, e.g. the port is taken
pub async fn bind_listener(addr: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Config(format!("Failed to parse server address: {}", e)))?;
    Ok(TcpListener::bind(addr).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_rejects_bad_address() {
        let result = bind_listener("localhost-ish").await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_bind_reports_taken_port() {
        let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = held.local_addr().unwrap().to_string();

        let result = bind_listener(&addr).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
