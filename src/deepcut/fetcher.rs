use crate::{Res, spotify::SpotifyApi, types::Playlist};

/// Items requested per playlist page; the largest page Spotify serves.
pub const PAGE_SIZE: usize = 100;

/// Reads a whole playlist by walking its pages in order.
///
/// Starts at offset 0 and advances by [`PAGE_SIZE`] until a page reaches the
/// total the API reports. Tracks are concatenated in the order the pages
/// return them, and the name is taken from the first page that has one.
///
/// An empty playlist still costs one call, since the total is only known
/// after the first page.
///
/// # Errors
///
/// The first failing page aborts the read; there is no retry.
pub async fn fetch_playlist<C>(api: &C, playlist_id: &str) -> Res<Playlist>
where
    C: SpotifyApi + ?Sized,
{
    let mut name = String::new();
    let mut tracks = Vec::new();
    let mut offset = 0;

    loop {
        let page = api
            .fetch_playlist_page(playlist_id, offset, PAGE_SIZE)
            .await?;
        log::debug!(
            "Playlist {} page at offset {}: {} tracks of {}",
            playlist_id,
            offset,
            page.tracks.len(),
            page.total
        );

        if name.is_empty() {
            name = page.name;
        }
        tracks.extend(page.tracks);

        if page.total <= offset + PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }

    log::info!("Retrieved playlist {} with {} tracks", playlist_id, tracks.len());

    Ok(Playlist {
        id: playlist_id.to_string(),
        name,
        tracks,
    })
}
