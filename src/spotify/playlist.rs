use crate::{
    error::SpotifyError,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetPlaylistResponse, Paging, PlaylistItem, PlaylistPage,
    },
};

use super::{SpotifyClient, check_status};

/// Retrieves one page of a playlist.
///
/// The first page comes from `GET /playlists/{id}`, which also carries the
/// playlist name. Later pages come from `GET /playlists/{id}/tracks` and
/// return an empty name; callers keep the name from the first page.
///
/// Items that cannot be used as a source track (removed tracks, local files
/// without a catalog id, podcast episodes) are dropped from `tracks`, while
/// `total` still reports the API's item count so paging stays aligned.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist
/// * `offset` - Index of the first item to return
/// * `limit` - Maximum number of items to return (1-100)
pub async fn get_page(
    client: &SpotifyClient,
    playlist_id: &str,
    offset: usize,
    limit: usize,
) -> Result<PlaylistPage, SpotifyError> {
    let (name, items) = if offset == 0 {
        let playlist: GetPlaylistResponse = client
            .get_json(&format!("/playlists/{id}", id = playlist_id))
            .await?;
        (playlist.name, playlist.tracks)
    } else {
        let items: Paging<PlaylistItem> = client
            .get_json(&format!(
                "/playlists/{id}/tracks?offset={offset}&limit={limit}",
                id = playlist_id,
                offset = offset,
                limit = limit
            ))
            .await?;
        (String::new(), items)
    };

    let fetched = items.items.len();
    let tracks: Vec<_> = items
        .items
        .into_iter()
        .filter_map(PlaylistItem::into_track)
        .collect();
    if tracks.len() < fetched {
        log::debug!(
            "Skipped {} unusable items in playlist {} at offset {}",
            fetched - tracks.len(),
            playlist_id,
            offset
        );
    }

    Ok(PlaylistPage {
        name,
        tracks,
        total: items.total,
    })
}

/// Creates a new playlist for `user_id` and returns the new playlist's id.
///
/// Uses `POST /users/{user_id}/playlists`. The playlist starts empty.
pub async fn create(
    client: &SpotifyClient,
    user_id: &str,
    name: &str,
    description: &str,
    public: bool,
    collaborative: bool,
) -> Result<String, SpotifyError> {
    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public,
        collaborative,
    };

    let response = client
        .http
        .post(client.url(&format!("/users/{id}/playlists", id = user_id)))
        .bearer_auth(&client.token)
        .json(&request)
        .send()
        .await?;

    let json = check_status(response)
        .await?
        .json::<CreatePlaylistResponse>()
        .await?;
    Ok(json.id)
}

/// Appends tracks to a playlist via `POST /playlists/{id}/tracks`.
///
/// Spotify accepts at most 100 URIs per call; splitting larger inputs is the
/// caller's job.
pub async fn add_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    track_ids: &[String],
) -> Result<(), SpotifyError> {
    let request = AddTrackToPlaylistRequest {
        uris: track_ids.iter().map(|id| track_uri(id)).collect(),
    };

    let response = client
        .http
        .post(client.url(&format!("/playlists/{id}/tracks", id = playlist_id)))
        .bearer_auth(&client.token)
        .json(&request)
        .send()
        .await?;

    let json = check_status(response)
        .await?
        .json::<AddTrackToPlaylistResponse>()
        .await?;
    log::debug!("Playlist {} now at snapshot {}", playlist_id, json.snapshot_id);
    Ok(())
}

/// Removes a playlist from the current user's library.
///
/// Spotify has no hard delete; unfollowing your own playlist is how it is
/// deleted from the user's point of view.
pub async fn unfollow(client: &SpotifyClient, playlist_id: &str) -> Result<(), SpotifyError> {
    let response = client
        .http
        .delete(client.url(&format!("/playlists/{id}/followers", id = playlist_id)))
        .bearer_auth(&client.token)
        .send()
        .await?;

    check_status(response).await?;
    Ok(())
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::{Value, json};

    use super::*;
    use crate::deepcut::{PAGE_SIZE, fetch_playlist};

    fn item(i: usize) -> Value {
        json!({
            "track": {
                "id": format!("t{}", i),
                "name": format!("Track {}", i),
                "album": { "id": format!("a{}", i), "name": "Album" }
            }
        })
    }

    // 150 items, the fifth of which has been removed from the catalog.
    async fn two_page_playlist(server: &mut mockito::ServerGuard) -> (mockito::Mock, mockito::Mock) {
        let mut first: Vec<Value> = (0..100).map(item).collect();
        first[4] = json!({ "track": null });

        let head = server
            .mock("GET", "/playlists/p1")
            .match_header("authorization", "Bearer tok")
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "p1",
                    "name": "Road Trip",
                    "tracks": { "items": first, "total": 150 }
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let tail = server
            .mock("GET", "/playlists/p1/tracks")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("offset".into(), "100".into()),
                Matcher::UrlEncoded("limit".into(), PAGE_SIZE.to_string()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(
                json!({ "items": (100..150).map(item).collect::<Vec<_>>(), "total": 150 })
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        (head, tail)
    }

    #[tokio::test]
    async fn test_pages_after_the_first_use_tracks_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let (head, tail) = two_page_playlist(&mut server).await;
        let client = SpotifyClient::new(server.url(), "tok".to_string());

        let first = get_page(&client, "p1", 0, PAGE_SIZE).await.unwrap();
        let second = get_page(&client, "p1", 100, PAGE_SIZE).await.unwrap();

        head.assert_async().await;
        tail.assert_async().await;
        assert_eq!(first.name, "Road Trip");
        assert_eq!(first.tracks.len(), 99);
        assert_eq!(first.total, 150);
        assert_eq!(second.name, "");
        assert_eq!(second.tracks.len(), 50);
        assert_eq!(second.tracks[0].id, "t100");
    }

    #[tokio::test]
    async fn test_skipped_items_keep_paging_aligned() {
        let mut server = mockito::Server::new_async().await;
        let (head, tail) = two_page_playlist(&mut server).await;
        let client = SpotifyClient::new(server.url(), "tok".to_string());

        let playlist = fetch_playlist(&client, "p1").await.unwrap();

        head.assert_async().await;
        tail.assert_async().await;
        assert_eq!(playlist.name, "Road Trip");
        assert_eq!(playlist.tracks.len(), 149);
        assert!(playlist.tracks.iter().all(|t| t.id != "t4"));
        assert_eq!(playlist.tracks.last().unwrap().id, "t149");
    }

    #[test]
    fn test_track_uri() {
        assert_eq!(track_uri("4uLU6hMCjMI75M1A2tKUQC"), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
    }
}
