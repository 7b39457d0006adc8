use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, info, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    info!("Waiting for Spotify authorization in the browser...");

    match spotify::auth::auth(shared_state).await {
        Ok(token) => {
            success!("Authentication successful!");
            println!("{}", token.access_token);
            info!(
                "Token is valid until {}. Pass it with --token or SPOTIFY_ACCESS_TOKEN.",
                token.expires_at.with_timezone(&chrono::Local).format("%H:%M:%S")
            );
        }
        Err(e) => error!("Authentication failed. Err: {}", e),
    }
}
