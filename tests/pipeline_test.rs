use std::{
    collections::{BTreeSet, HashMap},
    sync::Mutex,
};

use async_trait::async_trait;
use deepcut::{
    Error, SpotifyError,
    deepcut::{BATCH_SIZE, PAGE_SIZE, generate_deep_cut_playlist},
    spotify::SpotifyApi,
    types::{Album, PlaylistPage, SelectionPolicy, Track},
};
use rand::{SeedableRng, rngs::StdRng};

// In-memory catalog that records every call it receives.
#[derive(Default)]
struct FakeCatalog {
    playlists: Mutex<HashMap<String, (String, Vec<Track>)>>,
    albums: HashMap<String, Album>,
    page_calls: Mutex<Vec<(String, usize)>>,
    album_calls: Mutex<Vec<String>>,
    insert_calls: Mutex<Vec<Vec<String>>>,
    created: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn with_playlist(mut self, id: &str, name: &str, tracks: Vec<Track>) -> Self {
        self.playlists
            .get_mut()
            .unwrap()
            .insert(id.to_string(), (name.to_string(), tracks));
        self
    }

    fn with_album(mut self, album: Album) -> Self {
        self.albums.insert(album.id.clone(), album);
        self
    }
}

#[async_trait]
impl SpotifyApi for FakeCatalog {
    async fn fetch_playlist_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<PlaylistPage, SpotifyError> {
        self.page_calls
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), offset));
        let playlists = self.playlists.lock().unwrap();
        let (name, tracks) = playlists.get(playlist_id).ok_or(SpotifyError::Api {
            status: 404,
            message: "Not found.".to_string(),
        })?;
        let end = (offset + limit).min(tracks.len());
        Ok(PlaylistPage {
            name: name.clone(),
            tracks: tracks[offset.min(end)..end].to_vec(),
            total: tracks.len(),
        })
    }

    async fn fetch_album(&self, album_id: &str) -> Result<Album, SpotifyError> {
        self.album_calls.lock().unwrap().push(album_id.to_string());
        self.albums.get(album_id).cloned().ok_or(SpotifyError::Api {
            status: 404,
            message: "non existing id".to_string(),
        })
    }

    async fn create_playlist(
        &self,
        _user_id: &str,
        name: &str,
        _description: &str,
        _public: bool,
        _collaborative: bool,
    ) -> Result<String, SpotifyError> {
        let id = format!("created-{}", self.created.lock().unwrap().len());
        self.created.lock().unwrap().push(id.clone());
        self.playlists
            .lock()
            .unwrap()
            .insert(id.clone(), (name.to_string(), Vec::new()));
        Ok(id)
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), SpotifyError> {
        self.insert_calls.lock().unwrap().push(track_ids.to_vec());
        let album_of: HashMap<&str, &str> = self
            .albums
            .values()
            .flat_map(|a| a.tracks.iter())
            .map(|t| (t.id.as_str(), t.album_id.as_str()))
            .collect();
        let mut playlists = self.playlists.lock().unwrap();
        let (_, tracks) = playlists.get_mut(playlist_id).ok_or(SpotifyError::Api {
            status: 404,
            message: "Not found.".to_string(),
        })?;
        for id in track_ids {
            let album_id = album_of.get(id.as_str()).copied().unwrap_or_default();
            tracks.push(Track::new(id.clone(), id.clone(), album_id));
        }
        Ok(())
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), SpotifyError> {
        self.playlists.lock().unwrap().remove(playlist_id);
        Ok(())
    }

    async fn current_user(&self) -> Result<String, SpotifyError> {
        Ok("listener".to_string())
    }
}

fn album(id: &str, size: usize) -> Album {
    Album {
        id: id.to_string(),
        tracks: (0..size)
            .map(|i| Track::new(format!("{}-{}", id, i), format!("{} #{}", id, i), id))
            .collect(),
    }
}

#[tokio::test]
async fn test_large_playlist_pages_and_batches() {
    // 130 source tracks, each the first track of its own 3-track album
    let albums: Vec<Album> = (0..130).map(|i| album(&format!("al{}", i), 3)).collect();
    let originals: Vec<Track> = albums.iter().map(|a| a.tracks[0].clone()).collect();
    let mut catalog = FakeCatalog::default().with_playlist("src", "Big", originals.clone());
    for a in &albums {
        catalog = catalog.with_album(a.clone());
    }
    let mut rng = StdRng::seed_from_u64(3);

    let playlist =
        generate_deep_cut_playlist(&catalog, "src", SelectionPolicy::AllButOriginal, &mut rng)
            .await
            .unwrap();

    // 2 pages for the source, 3 pages to read back 260 tracks
    let page_calls = catalog.page_calls.lock().unwrap().clone();
    let source_offsets: Vec<usize> = page_calls
        .iter()
        .filter(|(id, _)| id == "src")
        .map(|(_, offset)| *offset)
        .collect();
    assert_eq!(source_offsets, vec![0, PAGE_SIZE]);
    assert_eq!(page_calls.len() - source_offsets.len(), 3);

    // one album fetch per original track, in order
    let album_calls = catalog.album_calls.lock().unwrap().clone();
    let expected_albums: Vec<String> = originals.iter().map(|t| t.album_id.clone()).collect();
    assert_eq!(album_calls, expected_albums);

    // 260 tracks inserted in chunks of at most 100
    let inserts = catalog.insert_calls.lock().unwrap().clone();
    assert_eq!(
        inserts.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![BATCH_SIZE, BATCH_SIZE, 60]
    );

    assert_eq!(playlist.name, "Big-deep-cut");
    assert_eq!(playlist.tracks.len(), 260);
    let expected: Vec<String> = albums
        .iter()
        .flat_map(|a| a.tracks[1..].iter().map(|t| t.id.clone()))
        .collect();
    let actual: Vec<String> = playlist.tracks.iter().map(|t| t.id.clone()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_one_track_per_track_run_has_no_duplicates_or_originals() {
    let shared = album("shared", 6);
    let solo = album("solo", 2);
    let originals = vec![
        shared.tracks[0].clone(),
        shared.tracks[3].clone(),
        solo.tracks[1].clone(),
        shared.tracks[5].clone(),
    ];

    for seed in 0..25 {
        let catalog = FakeCatalog::default()
            .with_playlist("src", "Mix", originals.clone())
            .with_album(shared.clone())
            .with_album(solo.clone());
        let mut rng = StdRng::seed_from_u64(seed);

        let playlist = generate_deep_cut_playlist(
            &catalog,
            "src",
            SelectionPolicy::OneTrackPerTrack,
            &mut rng,
        )
        .await
        .unwrap();

        let ids: Vec<&str> = playlist.tracks.iter().map(|t| t.id.as_str()).collect();
        let unique: BTreeSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 4, "seed {}", seed);
        assert_eq!(unique.len(), ids.len());
        for original in &originals {
            assert!(!unique.contains(original.id.as_str()));
        }
    }
}

#[tokio::test]
async fn test_empty_source_is_an_error_and_creates_nothing() {
    let catalog = FakeCatalog::default().with_playlist("src", "Nothing", Vec::new());
    let mut rng = StdRng::seed_from_u64(0);

    let result =
        generate_deep_cut_playlist(&catalog, "src", SelectionPolicy::AllButOriginal, &mut rng)
            .await;

    assert!(matches!(result, Err(Error::EmptyPlaylist(_))));
    assert!(catalog.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_album_aborts_without_writing() {
    let known = album("known", 3);
    let originals = vec![known.tracks[0].clone(), Track::new("x", "Orphan", "gone")];
    let catalog = FakeCatalog::default()
        .with_playlist("src", "Mix", originals)
        .with_album(known);
    let mut rng = StdRng::seed_from_u64(0);

    let result =
        generate_deep_cut_playlist(&catalog, "src", SelectionPolicy::AllButOriginal, &mut rng)
            .await;

    assert!(matches!(
        result,
        Err(Error::Spotify(SpotifyError::Api { status: 404, .. }))
    ));
    assert!(catalog.created.lock().unwrap().is_empty());
    assert!(catalog.insert_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_exhausted_albums_still_create_empty_playlist() {
    let tiny = album("tiny", 1);
    let catalog = FakeCatalog::default()
        .with_playlist("src", "Singles", tiny.tracks.clone())
        .with_album(tiny);
    let mut rng = StdRng::seed_from_u64(0);

    let playlist =
        generate_deep_cut_playlist(&catalog, "src", SelectionPolicy::OneTrackPerTrack, &mut rng)
            .await
            .unwrap();

    assert!(playlist.tracks.is_empty());
    assert_eq!(catalog.created.lock().unwrap().len(), 1);
    assert!(catalog.insert_calls.lock().unwrap().is_empty());
}
