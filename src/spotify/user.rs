use crate::{error::SpotifyError, types::CurrentUserResponse};

use super::SpotifyClient;

/// Returns the Spotify user id behind the client's access token (`GET /me`).
pub async fn current_user_id(client: &SpotifyClient) -> Result<String, SpotifyError> {
    let user: CurrentUserResponse = client.get_json("/me").await?;
    Ok(user.id)
}
