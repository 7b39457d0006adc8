use crate::{Res, spotify::SpotifyApi, types::Track};

/// Most track ids Spotify accepts in one insert call.
pub const BATCH_SIZE: usize = 100;
pub const PLAYLIST_DESCRIPTION: &str = "Created automatically";
pub const NAME_SUFFIX: &str = "-deep-cut";

/// Name of the playlist generated from `source_name`.
pub fn deep_cut_name(source_name: &str) -> String {
    format!("{}{}", source_name, NAME_SUFFIX)
}

/// Creates a private, non-collaborative playlist for `user_id` and fills it
/// with `tracks`, [`BATCH_SIZE`] ids per insert call, in order.
///
/// Returns the id of the new playlist.
///
/// # Errors
///
/// If an insert fails the playlist is unfollowed (Spotify's delete) before
/// the insert error is returned. A failing cleanup is logged and leaves the
/// partial playlist behind.
pub async fn write_playlist<C>(
    api: &C,
    user_id: &str,
    name: &str,
    tracks: &[Track],
) -> Res<String>
where
    C: SpotifyApi + ?Sized,
{
    let playlist_id = api
        .create_playlist(user_id, name, PLAYLIST_DESCRIPTION, false, false)
        .await?;
    log::info!("Created playlist '{}' ({})", name, playlist_id);

    let track_ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();

    for (i, chunk) in track_ids.chunks(BATCH_SIZE).enumerate() {
        if let Err(err) = api.add_tracks_to_playlist(&playlist_id, chunk).await {
            log::warn!(
                "Adding chunk {} to playlist {} failed, removing it: {}",
                i + 1,
                playlist_id,
                err
            );
            if let Err(cleanup) = api.unfollow_playlist(&playlist_id).await {
                log::warn!(
                    "Could not remove partial playlist {}: {}",
                    playlist_id,
                    cleanup
                );
            }
            return Err(err.into());
        }
        log::debug!("Added chunk {} ({} tracks) to {}", i + 1, chunk.len(), playlist_id);
    }

    Ok(playlist_id)
}
