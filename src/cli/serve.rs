use crate::{config, error, info, server};

pub async fn serve() {
    let policy = match config::selection_policy() {
        Ok(policy) => policy,
        Err(e) => error!("{}", e),
    };

    let state = server::AppState {
        policy,
        api_url: config::spotify_apiurl(),
    };

    info!(
        "Listening on {} with policy {}",
        config::server_addr(),
        state.policy
    );

    if let Err(e) = server::start_api_server(state).await {
        error!("Server stopped. Err: {}", e);
    }
}
