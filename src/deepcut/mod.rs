//! # Deep Cut Module
//!
//! The core of the generator. A run reads the source playlist, expands every
//! track's album, picks replacement tracks and writes them into a freshly
//! created playlist:
//!
//! ```text
//! fetcher (source playlist)
//!     ↓
//! expander (one album per original track)
//!     ↓
//! selector (policy + forbidden set)
//!     ↓
//! writer (create + chunked insert)
//!     ↓
//! fetcher (read back the new playlist)
//! ```
//!
//! All steps run sequentially against a [`SpotifyApi`]; every piece of run
//! state (forbidden set, buffers, random source) is owned by the call and
//! dropped when it returns.

pub mod expander;
pub mod fetcher;
pub mod selector;
pub mod writer;

pub use expander::expand_album;
pub use fetcher::{PAGE_SIZE, fetch_playlist};
pub use selector::{ForbiddenSet, pick_from_album, select_tracks};
pub use writer::{BATCH_SIZE, deep_cut_name, write_playlist};

use rand::Rng;

use crate::{
    Error, Res,
    spotify::SpotifyApi,
    types::{Playlist, SelectionPolicy},
};

/// Generates a deep cut playlist from `source_playlist_id`.
///
/// Reads the source playlist, selects replacement tracks under `policy`,
/// creates `<source name>-deep-cut` for the current user and returns the
/// created playlist as read back from the API.
///
/// # Arguments
///
/// * `api` - Remote catalog, already authorized for the user
/// * `source_playlist_id` - Playlist whose albums are mined
/// * `policy` - Selection policy, fixed for the whole run
/// * `rng` - Random source for [`SelectionPolicy::OneTrackPerTrack`]
///
/// # Errors
///
/// - [`Error::EmptyPlaylist`] when the source has no tracks; nothing is created
/// - [`Error::Spotify`] for the first failing remote call; when it happens
///   before the write step no playlist is created at all
pub async fn generate_deep_cut_playlist<C, R>(
    api: &C,
    source_playlist_id: &str,
    policy: SelectionPolicy,
    rng: &mut R,
) -> Res<Playlist>
where
    C: SpotifyApi + ?Sized,
    R: Rng + ?Sized,
{
    let source = fetch_playlist(api, source_playlist_id).await?;
    if source.tracks.is_empty() {
        return Err(Error::EmptyPlaylist(source_playlist_id.to_string()));
    }

    let final_tracks = select_tracks(api, &source.tracks, policy, rng).await?;

    let user_id = api.current_user().await?;
    let name = deep_cut_name(&source.name);
    let playlist_id = write_playlist(api, &user_id, &name, &final_tracks).await?;

    fetch_playlist(api, &playlist_id).await
}
