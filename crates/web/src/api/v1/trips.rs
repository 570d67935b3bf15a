use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{get, on, post},
    Json, Router,
};
use model::trip::TripRecord;
use serde::Deserialize;
use serde_json::{json, Value};
use shuttle_core::ledger::TripCommand;
use utility::id::Id;

use crate::{
    common::{
        route_not_found, schema, RouteErrorResponse, RouteResult, VecResponse,
        METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<TripRecord>))
        .route("/", post(trip_action))
        .route("/history/:username", get(trip_history))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Explicitly typed trip request. The action decides whether this starts or
/// ends a trip on the named shuttle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TripRequestDto {
    username: String,
    action: String,
    shuttle_id: String,
}

async fn trip_action(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { ledger, .. }): State<WebState>,
    Json(body): Json<TripRequestDto>,
) -> RouteResult<Json<Value>> {
    let map_err = |why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
    };

    let username = Id::new(body.username);
    let shuttle_id = Id::new(body.shuttle_id);

    match TripCommand::parse(&body.action).map_err(map_err)? {
        TripCommand::Start => {
            ledger
                .start_trip(&username, &shuttle_id)
                .await
                .map_err(map_err)?;
            Ok(Json(json!({ "message": "Trip started" })))
        }
        TripCommand::End => {
            let receipt = ledger
                .end_trip(&username, &shuttle_id)
                .await
                .map_err(map_err)?;
            Ok(Json(json!({
                "message": "Trip ended",
                "price": receipt.price,
                "distance": receipt.distance_km,
            })))
        }
    }
}

async fn trip_history(
    OriginalUri(original_uri): OriginalUri,
    Path(username): Path<String>,
    State(WebState { ledger, .. }): State<WebState>,
) -> RouteResult<Json<VecResponse<TripRecord>>> {
    ledger
        .trip_history(&Id::new(username))
        .await
        .map(|trips| Json(VecResponse::new(trips)))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}
