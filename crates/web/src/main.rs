use std::sync::Arc;

use memory_store::{MemoryLocationStore, MemoryUserStore};
use shuttle_core::{ledger::TripLedger, registry::LocationRegistry};
use web::WebState;

#[tokio::main]
async fn main() {
    env_logger::init();

    // stores; the ledger reads the same location store the registry writes
    let locations = MemoryLocationStore::new();
    let users = MemoryUserStore::new();

    let state = WebState {
        registry: Arc::new(LocationRegistry::new(locations.clone())),
        ledger: Arc::new(TripLedger::new(locations, users)),
    };

    web::start_web_server(state)
        .await
        .expect("could not start web server.");
}
