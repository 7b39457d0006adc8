use axum::{http::header, response::IntoResponse, response::Json};
use serde_json::{Value, json};

pub async fn health() -> impl IntoResponse {
    (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(status()),
    )
}

fn status() -> Value {
    json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    })
}
