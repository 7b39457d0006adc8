//! # CLI Module
//!
//! Command-line layer of deepcut. Each command turns its arguments into calls
//! on the library and reports progress with the crate's output macros.
//!
//! ## Commands
//!
//! - [`auth`] - runs the PKCE flow and prints an access token
//! - [`serve`] - starts the HTTP API
//! - [`generate`] - builds a deep cut playlist and prints its tracks
//! - [`show`] - prints the tracks of a playlist
//!
//! ## Usage Patterns
//!
//! ```bash
//! deepcut auth                                  # Obtain an access token
//! export SPOTIFY_ACCESS_TOKEN=BQC...
//! deepcut show 37i9dQZF1DXcBWIGoYBM5M           # Inspect the source playlist
//! deepcut generate 37i9dQZF1DXcBWIGoYBM5M       # Every other album track
//! deepcut generate 37i9dQZF1DXcBWIGoYBM5M --policy one-track-per-track
//! deepcut serve                                 # HTTP API on SERVER_ADDRESS
//! ```
//!
//! Fatal errors are printed with `error!`, which exits with status 1.

mod auth;
mod generate;
mod serve;

pub use auth::auth;
pub use generate::{generate, show};
pub use serve::serve;
