use crate::{
    Res,
    spotify::SpotifyApi,
    types::{Album, Track},
};

/// Fetches the full tracklist of the album `track` belongs to.
///
/// Every call goes to the API, even when an earlier track shared the album.
pub async fn expand_album<C>(api: &C, track: &Track) -> Res<Album>
where
    C: SpotifyApi + ?Sized,
{
    let album = api.fetch_album(&track.album_id).await?;
    log::debug!(
        "Album {} of '{}' holds {} tracks",
        album.id,
        track.name,
        album.tracks.len()
    );
    Ok(album)
}
