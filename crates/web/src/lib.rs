pub use crate::common::RouteResult;

use std::{env, sync::Arc};

use axum::{extract::FromRef, Router};
use memory_store::{MemoryLocationStore, MemoryUserStore};
use shuttle_core::{ledger::TripLedger, registry::LocationRegistry};
use tokio::net::TcpListener;

pub mod api;
pub mod common;
pub mod hateoas;
pub mod middleware;

const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub registry: Arc<LocationRegistry<MemoryLocationStore>>,
    pub ledger: Arc<TripLedger<MemoryLocationStore, MemoryUserStore>>,
}

pub async fn start_web_server(state: WebState) -> std::io::Result<()> {
    let routes = Router::new().nest_service("/api", api::routes(state));

    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("server is listening on port {port}");
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
