use deepcut::types::*;
use serde_json::json;

#[test]
fn test_playlist_response_skips_unusable_items() {
    let body = json!({
        "id": "p1",
        "name": "Road Trip",
        "tracks": {
            "items": [
                { "track": { "id": "t1", "name": "First", "album": { "id": "a1", "name": "Album" } } },
                { "track": null },
                { "track": { "id": null, "name": "Local file", "album": { "id": null, "name": "" } } },
                { "track": { "id": "e1", "name": "Episode" } },
                { "track": { "id": "t2", "name": "Second", "album": { "id": "a2", "name": "Other" } } }
            ],
            "total": 5,
            "next": null
        }
    });

    let playlist: GetPlaylistResponse = serde_json::from_value(body).unwrap();
    assert_eq!(playlist.name, "Road Trip");
    assert_eq!(playlist.tracks.total, 5);

    let tracks: Vec<Track> = playlist
        .tracks
        .items
        .into_iter()
        .filter_map(PlaylistItem::into_track)
        .collect();
    assert_eq!(
        tracks,
        vec![Track::new("t1", "First", "a1"), Track::new("t2", "Second", "a2")]
    );
}

#[test]
fn test_album_response_tracks_take_album_id() {
    let body = json!({
        "id": "a1",
        "name": "Album",
        "tracks": {
            "items": [
                { "id": "t1", "name": "Intro" },
                { "id": "t2", "name": "Single" }
            ],
            "total": 2
        }
    });

    let album: GetAlbumResponse = serde_json::from_value(body).unwrap();
    assert_eq!(album.tracks.total, 2);

    let tracks: Vec<Track> = album
        .tracks
        .items
        .into_iter()
        .filter_map(|t| t.into_track("a1"))
        .collect();
    assert_eq!(tracks.len(), 2);
    assert!(tracks.iter().all(|t| t.album_id == "a1"));
}

#[test]
fn test_spotify_error_body() {
    let body = json!({ "error": { "status": 401, "message": "The access token expired" } });

    let parsed: ApiErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.error.status, 401);
    assert_eq!(parsed.error.message, "The access token expired");
}

#[test]
fn test_create_playlist_request_shape() {
    let request = CreatePlaylistRequest {
        name: "Road Trip-deep-cut".to_string(),
        description: "Created automatically".to_string(),
        public: false,
        collaborative: false,
    };

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "name": "Road Trip-deep-cut",
            "description": "Created automatically",
            "public": false,
            "collaborative": false
        })
    );
}

#[test]
fn test_track_table_rows_are_numbered() {
    let rows = TrackTableRow::rows(&[Track::new("t1", "One", "a"), Track::new("t2", "Two", "a")]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].id, "t2");
}
