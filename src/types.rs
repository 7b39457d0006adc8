use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::ParsePolicyError;

#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Body of a successful `POST /api/token` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A catalog track together with the album it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album_id: String,
}

impl Track {
    pub fn new(id: impl Into<String>, name: impl Into<String>, album_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            album_id: album_id.into(),
        }
    }
}

/// An album and its full tracklist in album order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

/// One page of a playlist as returned by the remote API.
///
/// `total` is the size of the whole playlist as reported by the API, not the
/// length of `tracks`. `name` may be empty on pages after the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistPage {
    pub name: String,
    pub tracks: Vec<Track>,
    pub total: usize,
}

/// How replacement tracks are chosen from each source track's album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionPolicy {
    /// Every album track that is not an original track.
    #[default]
    AllButOriginal,
    /// One random, not yet used album track per original track.
    OneTrackPerTrack,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::AllButOriginal => "ALL_BUT_ORIGINAL",
            SelectionPolicy::OneTrackPerTrack => "ONE_TRACK_PER_TRACK",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ALL_BUT_ORIGINAL" => Ok(SelectionPolicy::AllButOriginal),
            "ONE_TRACK_PER_TRACK" => Ok(SelectionPolicy::OneTrackPerTrack),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub id: String,
}

impl TrackTableRow {
    pub fn rows(tracks: &[Track]) -> Vec<TrackTableRow> {
        tracks
            .iter()
            .enumerate()
            .map(|(i, track)| TrackTableRow {
                position: i + 1,
                name: track.name.clone(),
                id: track.id.clone(),
            })
            .collect()
    }
}

// Spotify Web API wire types.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPlaylistResponse {
    pub id: String,
    pub name: String,
    pub tracks: Paging<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<FullTrack>,
}

/// Track object as embedded in playlist items; episodes carry no album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAlbumResponse {
    pub id: String,
    pub name: String,
    pub tracks: Paging<SimpleTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

impl PlaylistItem {
    /// Converts the item into a [`Track`], skipping removed tracks, local
    /// files without a catalog id and podcast episodes.
    pub fn into_track(self) -> Option<Track> {
        let track = self.track?;
        let id = track.id?;
        let album_id = track.album?.id?;
        Some(Track {
            id,
            name: track.name,
            album_id,
        })
    }
}

impl SimpleTrack {
    pub fn into_track(self, album_id: &str) -> Option<Track> {
        Some(Track {
            id: self.id?,
            name: self.name,
            album_id: album_id.to_string(),
        })
    }
}
