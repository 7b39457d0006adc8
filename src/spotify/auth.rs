use std::{sync::Arc, time::Duration};

use chrono::{TimeDelta, Utc};
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Error, Res, config,
    server::{bind_listener, start_callback_server},
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

use super::check_status;

/// Runs the OAuth 2.0 PKCE flow and returns the resulting access token.
///
/// This is the explicit token-acquisition step that precedes every deep cut
/// run. The flow:
/// 1. Generates a PKCE code verifier and its SHA256 challenge
/// 2. Binds and starts the local callback server
/// 3. Opens the authorization URL in the user's browser
/// 4. Waits (up to 60 seconds) for the callback to deliver a token
///
/// The token is handed back to the caller and not persisted anywhere.
///
/// # Arguments
///
/// * `shared_state` - State shared with the callback handler, holding the
///   code verifier and, once the exchange succeeded, the token
///
/// # Errors
///
/// - [`Error::Config`] if the client id or the server address is not usable
/// - [`Error::Io`] if the callback address cannot be bound
/// - [`Error::Auth`] if no token arrived before the timeout
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<Token> {
    let listener = bind_listener(&config::server_addr()).await?;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let auth_url = authorize_url(Some(&code_challenge))?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let mut server = tokio::spawn(start_callback_server(listener, server_state));

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = tokio::select! {
        token = wait_for_token(shared_state) => token,
        served = &mut server => {
            return Err(match served {
                Ok(Err(e)) => e,
                Ok(Ok(())) => Error::Auth("callback server stopped".to_string()),
                Err(e) => Error::Auth(format!("callback server failed: {}", e)),
            });
        }
    };
    server.abort();

    token.ok_or_else(|| Error::Auth("authorization timed out".to_string()))
}

/// Builds the Spotify authorization URL.
///
/// With a `code_challenge` the URL requests the PKCE flow (`S256`); without
/// one it is the plain authorization code flow used by browser front ends
/// that hand the code to the `/token` endpoint.
pub fn authorize_url(code_challenge: Option<&str>) -> Res<Url> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();
    let scope = config::spotify_scope();

    let mut params = vec![
        ("client_id", client_id.as_str()),
        ("response_type", "code"),
        ("redirect_uri", redirect_uri.as_str()),
        ("scope", scope.as_str()),
    ];
    if let Some(challenge) = code_challenge {
        params.push(("code_challenge", challenge));
        params.push(("code_challenge_method", "S256"));
    }

    Url::parse_with_params(&config::spotify_apiauth_url(), &params)
        .map_err(|e| Error::Config(format!("invalid authorization URL: {}", e)))
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token.
///
/// Sends the PKCE `code_verifier` when one is given and the client secret
/// when one is configured; Spotify needs at least one of the two.
///
/// # Errors
///
/// - [`Error::Config`] if the client id is not configured
/// - [`Error::Spotify`] if the token endpoint rejects the code or is unreachable
pub async fn exchange_code(code: &str, verifier: Option<&str>) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();
    let client_secret = config::spotify_client_secret();

    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("client_id", client_id.as_str()),
        ("code", code),
        ("redirect_uri", redirect_uri.as_str()),
    ];
    if let Some(verifier) = verifier {
        form.push(("code_verifier", verifier));
    }
    if let Some(secret) = client_secret.as_deref() {
        form.push(("client_secret", secret));
    }

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&form)
        .send()
        .await
        .map_err(crate::SpotifyError::from)?;

    let json = check_status(res)
        .await?
        .json::<TokenResponse>()
        .await
        .map_err(crate::SpotifyError::from)?;

    Ok(Token {
        access_token: json.access_token,
        expires_at: Utc::now() + TimeDelta::seconds(json.expires_in as i64),
    })
}
