//! # Spotify Integration Module
//!
//! This module is the integration layer between deepcut and the Spotify Web
//! API. The core algorithm never talks HTTP directly; it is written against
//! the [`SpotifyApi`] trait, the minimal capability surface it needs:
//!
//! ```text
//! deepcut core (fetcher, expander, selector, writer)
//!          ↓
//! SpotifyApi trait
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Submodules
//!
//! - [`playlist`] - playlist pages, creation, track insertion and removal
//! - [`album`] - full album tracklists, paging through long albums
//! - [`user`] - the current user's profile
//! - [`auth`] - authorization URL and code-for-token exchange
//!
//! ## API Coverage
//!
//! - `GET /me`
//! - `GET /playlists/{id}` and `GET /playlists/{id}/tracks`
//! - `GET /albums/{id}` and `GET /albums/{id}/tracks`
//! - `POST /users/{user_id}/playlists`
//! - `POST /playlists/{id}/tracks`
//! - `DELETE /playlists/{id}/followers`
//! - `POST /api/token`
//!
//! ## Error Handling
//!
//! Every call returns [`SpotifyError`]. Nothing is retried here: a failed
//! call aborts the run it belongs to.
//!
//! ## Authentication
//!
//! A [`SpotifyClient`] is built from an access token obtained beforehand
//! (by the `auth` command or the `/token` endpoint). The client holds no
//! process-wide state and lives for a single run.

pub mod album;
pub mod auth;
pub mod playlist;
pub mod user;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::{
    error::SpotifyError,
    types::{Album, ApiErrorResponse, PlaylistPage},
};

/// Remote catalog and playlist operations the deep cut generator relies on.
///
/// Implemented by [`SpotifyClient`] for the real service; tests substitute the
/// generated `MockSpotifyApi`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Reads `limit` playlist items starting at `offset`.
    async fn fetch_playlist_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<PlaylistPage, SpotifyError>;

    /// Reads an album with its complete tracklist.
    async fn fetch_album(&self, album_id: &str) -> Result<Album, SpotifyError>;

    /// Creates an empty playlist owned by `user_id` and returns its id.
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
        collaborative: bool,
    ) -> Result<String, SpotifyError>;

    /// Appends tracks to the end of a playlist.
    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), SpotifyError>;

    /// Removes a playlist from the current user's library.
    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), SpotifyError>;

    /// Returns the id of the user the access token belongs to.
    async fn current_user(&self) -> Result<String, SpotifyError>;
}

/// reqwest-backed [`SpotifyApi`] implementation bound to one access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(api_url: String, token: String) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, SpotifyError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let json = check_status(response).await?.json::<T>().await?;
        Ok(json)
    }
}

/// Turns a non-success response into [`SpotifyError::Api`], keeping the
/// message from Spotify's error body when it has one.
pub(crate) async fn check_status(response: Response) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(SpotifyError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn fetch_playlist_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<PlaylistPage, SpotifyError> {
        playlist::get_page(self, playlist_id, offset, limit).await
    }

    async fn fetch_album(&self, album_id: &str) -> Result<Album, SpotifyError> {
        album::get_album(self, album_id).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
        collaborative: bool,
    ) -> Result<String, SpotifyError> {
        playlist::create(self, user_id, name, description, public, collaborative).await
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), SpotifyError> {
        playlist::add_tracks(self, playlist_id, track_ids).await
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), SpotifyError> {
        playlist::unfollow(self, playlist_id).await
    }

    async fn current_user(&self) -> Result<String, SpotifyError> {
        user::current_user_id(self).await
    }
}
