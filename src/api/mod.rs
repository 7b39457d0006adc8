//! # API Module
//!
//! HTTP endpoints served by `deepcut serve`, plus the OAuth callback used by
//! `deepcut auth`.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, status and version
//! - [`token`] - `GET /token?code=...`, exchanges an authorization code for
//!   an access token
//! - [`get_playlist`] - `GET /{playlist_id}`, the tracks of a playlist
//! - [`generate`] - `POST /{playlist_id}`, builds the deep cut playlist and
//!   returns its tracks
//! - [`preflight`] - `OPTIONS /` and `OPTIONS /{playlist_id}`
//! - [`callback`] - `GET /callback`, completes the PKCE flow
//!
//! Playlist endpoints expect `Authorization: Bearer <token>`. Each request
//! builds its own [`SpotifyClient`](crate::spotify::SpotifyClient) from that
//! token; no credentials are kept between requests.
//!
//! Every response carries `Access-Control-Allow-Origin: *` so a browser
//! front end on another origin can call the service.

mod callback;
mod health;
mod playlist;
mod token;

pub use callback::callback;
pub use health::health;
pub use playlist::{generate, get_playlist};
pub use token::token;

use axum::{
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{Error, error::SpotifyError, spotify::SpotifyClient, utils};

pub const ALLOWED_HEADERS: &str =
    "Origin, X-Requested-With, Content-Type, Accept, Authorization";

/// Error response: status code plus `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(json!({ "error": self.message })),
        )
            .into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        log::error!("{}", err);
        match err {
            Error::EmptyPlaylist(_) => ApiError::new(StatusCode::BAD_REQUEST, "No tracks in playlist"),
            Error::Spotify(SpotifyError::Api { status: 401, .. }) => {
                ApiError::new(StatusCode::FORBIDDEN, "Error getting auth.")
            }
            Error::Spotify(SpotifyError::Api { status: 404, .. }) => {
                ApiError::new(
                    StatusCode::NOT_FOUND,
                    "Playlist or one of its albums not found.",
                )
            }
            other => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
}

/// Builds a request-scoped client from the `Authorization` header.
pub(crate) fn client_from_headers(
    headers: &HeaderMap,
    api_url: &str,
) -> Result<SpotifyClient, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(utils::parse_bearer)
        .ok_or_else(|| ApiError::new(StatusCode::FORBIDDEN, "Missing bearer token."))?;

    Ok(SpotifyClient::new(api_url.to_string(), token.to_string()))
}

pub(crate) fn require_playlist_id(playlist_id: &str) -> Result<(), ApiError> {
    if utils::is_valid_playlist_id(playlist_id) {
        Ok(())
    } else {
        Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Couldn't get playlist ID from request.",
        ))
    }
}
