//! HTTP server wiring: state construction, routing, and the run loop.

pub mod config;

use std::sync::Arc;

use actix_web::{web, App, HttpServer, Scope};
use tracing::info;

use crate::domain::{
    InventoryService, ProductService, ReportingService, SeedService, SettingsService,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{dashboard, export, inventories, products, seed, settings};
use crate::outbound::persistence::MemoryStore;

pub use config::ServerConfig;

/// Build the shared use-case state over one in-memory store.
pub fn build_state(store: Arc<MemoryStore>) -> HttpState {
    HttpState::new(
        Arc::new(InventoryService::new(store.clone())),
        Arc::new(ProductService::new(store.clone(), store.clone())),
        Arc::new(ReportingService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        Arc::new(SeedService::new(store.clone(), store.clone())),
        Arc::new(SettingsService::new(store)),
    )
}

/// The `/api/v1` scope with every business endpoint registered.
///
/// Shared with integration tests so they exercise the same routing table as
/// the running server.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(inventories::list_inventories)
        .service(inventories::create_inventory)
        .service(inventories::update_inventory)
        .service(inventories::delete_inventory)
        // bulk-delete before {id} so the literal segment wins.
        .service(products::bulk_delete_products)
        .service(products::list_products)
        .service(products::create_product)
        .service(products::get_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(dashboard::get_dashboard)
        .service(dashboard::get_stats)
        .service(export::export_csv)
        .service(seed::seed_products)
        .service(settings::get_settings)
        .service(settings::update_settings)
}

/// Bind and run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = build_state(Arc::new(MemoryStore::new()));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    info!(bind_addr = %config.bind_addr, "starting http server");
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .service(api_scope())
            .service(ready)
            .service(live)
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
