use thiserror::Error;

/// Failure reported by the Spotify Web API or the transport underneath it.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Connection, TLS, timeout or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Spotify API returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Errors surfaced by deepcut operations.
///
/// A run aborts on the first error; nothing is retried and no partial
/// result is handed back to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// A remote read or write failed while paging, expanding an album or
    /// writing the destination playlist.
    #[error("remote call failed: {0}")]
    Spotify(#[from] SpotifyError),

    /// The source playlist holds no usable tracks.
    #[error("playlist {0} has no tracks")]
    EmptyPlaylist(String),

    /// A required setting is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Token acquisition did not complete.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Returned when a selection policy name is not one of the known policies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "unknown selection policy '{0}' (expected ALL_BUT_ORIGINAL or ONE_TRACK_PER_TRACK)"
)]
pub struct ParsePolicyError(pub String);

impl From<ParsePolicyError> for Error {
    fn from(err: ParsePolicyError) -> Self {
        Error::Config(err.to_string())
    }
}
