//! Deep Cut playlist generator
//!
//! This library builds a "deep cut" playlist out of an existing Spotify
//! playlist: every source track points at its parent album, and the album's
//! other tracks become the candidates for the new playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints served by the local web server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `deepcut` - Paging, album expansion, track selection and batch writing
//! - `error` - Error types shared across the crate
//! - `server` - Router setup for the HTTP surface and the OAuth callback
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Domain model and Spotify wire types
//! - `utils` - PKCE helpers and small shared functions
//!
//! # Example
//!
//! ```
//! use deepcut::{config, deepcut::generate_deep_cut_playlist, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> deepcut::Res<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::new(config::spotify_apiurl(), "BQC...".to_string());
//!     let policy = config::selection_policy()?;
//!     let mut rng = rand::rng();
//!     let playlist = generate_deep_cut_playlist(&client, "37i9dQZF1DX", policy, &mut rng).await?;
//!     println!("{} tracks", playlist.tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod deepcut;
pub mod error;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, ParsePolicyError, SpotifyError};

/// A convenient Result type alias for operations that may fail.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Created playlist {}", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used from the binary for unrecoverable errors; library code returns
/// [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
