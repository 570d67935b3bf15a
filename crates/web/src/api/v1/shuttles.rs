use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{get, on},
    Extension, Json, Router,
};
use model::{
    shuttle::{ShuttleState, ShuttleStatus},
    WithId,
};
use serde::Deserialize;
use shuttle_core::registry::ShuttleReport;
use utility::id::Id;

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, RouteResult,
        VecResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/shuttles{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<ShuttleState>))
        .route("/:id", get(get_shuttle))
        .route("/", get(get_shuttles).post(report_location))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Body of a position report from a shuttle's onboard device.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportLocationDto {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    status: ShuttleStatus,
}

async fn report_location(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { registry, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(body): Json<ReportLocationDto>,
) -> RouteResult<(StatusCode, Json<hateoas::Response<WithId<ShuttleState>>>)> {
    registry
        .report(
            Id::new(body.id),
            ShuttleReport {
                name: body.name,
                latitude: body.latitude,
                longitude: body.longitude,
                status: body.status,
            },
        )
        .await
        .map(|shuttle| {
            (
                StatusCode::CREATED,
                shuttle_hateoas(shuttle, base_url.clone()).json(),
            )
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn get_shuttles(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { registry, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<ShuttleState>>>> {
    registry
        .list_all()
        .await
        .map(|shuttles| {
            let data = shuttles
                .into_iter()
                .map(|shuttle| shuttle_hateoas(shuttle, base_url.clone()))
                .collect::<Vec<_>>();
            VecResponse::new(data).hateoas().json()
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn get_shuttle(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { registry, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<WithId<ShuttleState>> {
    registry
        .get(&Id::new(id))
        .await
        .map(|shuttle| shuttle_hateoas(shuttle, base_url.clone()).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

fn shuttle_hateoas(
    shuttle: WithId<ShuttleState>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithId<ShuttleState>> {
    let id = shuttle.id.raw();
    hateoas::Response::builder(shuttle, base_url)
        .link("self", resource!("/{}", id))
        .link("all", resource!(""))
        .build()
}
