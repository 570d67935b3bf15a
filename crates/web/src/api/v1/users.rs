use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{on, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utility::id::Id;

use crate::{
    common::{route_not_found, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", post(register_user))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Registration request. The credential arrives pre-hashed from the auth
/// layer; this service never handles the plaintext password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUserDto {
    username: String,
    password_hash: String,
}

async fn register_user(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { ledger, .. }): State<WebState>,
    Json(body): Json<RegisterUserDto>,
) -> RouteResult<Json<Value>> {
    ledger
        .register_user(Id::new(body.username), body.password_hash)
        .await
        .map(|_| Json(json!({ "message": "User registered successfully" })))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}
