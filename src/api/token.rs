use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::spotify::auth::exchange_code;

use super::ApiError;

/// `GET /token?code=...` - trades an authorization code for an access token.
pub async fn token(
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let code = params
        .get("code")
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ApiError::new(StatusCode::FORBIDDEN, "Couldn't get code from request."))?;

    let token = exchange_code(code, None).await.map_err(|e| {
        log::error!("Token exchange failed: {}", e);
        ApiError::new(StatusCode::FORBIDDEN, "Error getting token.")
    })?;

    log::info!("Successfully returning token.");
    Ok((
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(json!({ "token": token.access_token })),
    ))
}
