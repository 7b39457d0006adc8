use crate::{
    error::SpotifyError,
    types::{Album, GetAlbumResponse, Paging, SimpleTrack},
};

use super::SpotifyClient;

/// Page size of `GET /albums/{id}/tracks`.
pub const ALBUM_PAGE_SIZE: usize = 50;

/// Retrieves an album with its complete, ordered tracklist.
///
/// `GET /albums/{id}` embeds the first page of the tracklist. When the
/// reported total exceeds what was embedded, the remaining tracks are read
/// from `GET /albums/{id}/tracks` with the same offset/limit paging used for
/// playlists, so long albums and box sets come back whole.
///
/// Tracks without a catalog id are dropped.
///
/// # Errors
///
/// Any failed request is returned as-is; nothing is retried.
pub async fn get_album(client: &SpotifyClient, album_id: &str) -> Result<Album, SpotifyError> {
    let album: GetAlbumResponse = client
        .get_json(&format!("/albums/{id}", id = album_id))
        .await?;

    let total = album.tracks.total;
    let mut items: Vec<SimpleTrack> = album.tracks.items;
    let mut offset = items.len();

    while offset < total {
        let page: Paging<SimpleTrack> = client
            .get_json(&format!(
                "/albums/{id}/tracks?offset={offset}&limit={limit}",
                id = album.id,
                offset = offset,
                limit = ALBUM_PAGE_SIZE
            ))
            .await?;
        if page.items.is_empty() {
            break;
        }
        offset += page.items.len();
        items.extend(page.items);
    }

    let tracks = items
        .into_iter()
        .filter_map(|track| track.into_track(&album.id))
        .collect();

    Ok(Album {
        id: album.id,
        tracks,
    })
}
