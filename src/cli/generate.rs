use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use tabled::Table;

use crate::{
    config,
    deepcut::{fetch_playlist, generate_deep_cut_playlist},
    error, info,
    spotify::SpotifyClient,
    success,
    types::{SelectionPolicy, TrackTableRow},
};

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub async fn generate(playlist_id: String, policy: Option<SelectionPolicy>, token: String) {
    let policy = match policy {
        Some(policy) => policy,
        None => match config::selection_policy() {
            Ok(policy) => policy,
            Err(e) => error!("{}", e),
        },
    };

    let client = SpotifyClient::new(config::spotify_apiurl(), token);
    let mut rng = StdRng::from_os_rng();

    let pb = spinner(format!(
        "Generating deep cut playlist from {} ({})...",
        playlist_id, policy
    ));
    let result = generate_deep_cut_playlist(&client, &playlist_id, policy, &mut rng).await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) => {
            success!(
                "Created playlist '{}' ({}) with {} tracks",
                playlist.name,
                playlist.id,
                playlist.tracks.len()
            );
            if !playlist.tracks.is_empty() {
                println!("{}", Table::new(TrackTableRow::rows(&playlist.tracks)));
            }
        }
        Err(e) => error!("Failed to generate playlist. Err: {}", e),
    }
}

pub async fn show(playlist_id: String, token: String) {
    let client = SpotifyClient::new(config::spotify_apiurl(), token);

    let pb = spinner(format!("Fetching playlist {}...", playlist_id));
    let result = fetch_playlist(&client, &playlist_id).await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) if playlist.tracks.is_empty() => {
            info!("Playlist '{}' has no tracks", playlist.name)
        }
        Ok(playlist) => {
            info!("{} ({} tracks)", playlist.name, playlist.tracks.len());
            println!("{}", Table::new(TrackTableRow::rows(&playlist.tracks)));
        }
        Err(e) => error!("Failed to load playlist. Err: {}", e),
    }
}
