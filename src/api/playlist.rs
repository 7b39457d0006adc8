use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json},
};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    deepcut::{fetch_playlist, generate_deep_cut_playlist},
    server::AppState,
};

use super::{ApiError, client_from_headers, require_playlist_id};

/// `GET /{playlist_id}` - returns the playlist's tracks.
pub async fn get_playlist(
    State(state): State<Arc<AppState>>,
    Path(playlist_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let client = client_from_headers(&headers, &state.api_url)?;
    require_playlist_id(&playlist_id)?;

    let playlist = fetch_playlist(&client, &playlist_id).await?;
    log::info!("Returning {} tracks of {}", playlist.tracks.len(), playlist_id);

    Ok((
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(playlist.tracks),
    ))
}

/// `POST /{playlist_id}` - generates the deep cut playlist with the
/// configured policy and returns the tracks of the created playlist.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Path(playlist_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let client = client_from_headers(&headers, &state.api_url)?;
    require_playlist_id(&playlist_id)?;

    log::info!(
        "Generating deep cut playlist for {} ({})",
        playlist_id,
        state.policy
    );

    let mut rng = StdRng::from_os_rng();
    let playlist =
        generate_deep_cut_playlist(&client, &playlist_id, state.policy, &mut rng).await?;

    log::info!(
        "Created playlist '{}' ({}) with {} tracks",
        playlist.name,
        playlist.id,
        playlist.tracks.len()
    );

    Ok((
        StatusCode::CREATED,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(playlist.tracks),
    ))
}
