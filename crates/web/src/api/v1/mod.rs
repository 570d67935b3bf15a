use axum::{
    routing::on,
    Router,
};

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

mod shuttles;
mod trips;
mod users;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .nest_service("/shuttles", shuttles::routes(state.clone()))
        .nest_service("/trips", trips::routes(state.clone()))
        .nest_service("/users", users::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}
