//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API from the
//! handler annotations in the inbound layer. The document is served by
//! tooling and external clients; the API itself does not depend on it.

use utoipa::OpenApi;

use crate::domain::{
    DashboardReport, Efficiency, Error, ErrorCode, InventoryMetrics, InventoryStats,
    RecentProduct, StockStatus, WeekBucket,
};
use crate::inbound::http::inventories::{
    CreateInventoryPayload, InventoryResponse, UpdateInventoryPayload,
};
use crate::inbound::http::products::{
    BulkDeletePayload, BulkDeleteResponse, ProductPayload, ProductResponse,
};
use crate::inbound::http::seed::SeedResponse;
use crate::inbound::http::settings::{SettingsPayload, SettingsResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory backend API",
        description = "Multi-tenant inventory tracking: inventories, products, \
                       dashboards, CSV export and user settings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::inventories::list_inventories,
        crate::inbound::http::inventories::create_inventory,
        crate::inbound::http::inventories::update_inventory,
        crate::inbound::http::inventories::delete_inventory,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::products::bulk_delete_products,
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::dashboard::get_stats,
        crate::inbound::http::export::export_csv,
        crate::inbound::http::seed::seed_products,
        crate::inbound::http::settings::get_settings,
        crate::inbound::http::settings::update_settings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        StockStatus,
        InventoryResponse,
        CreateInventoryPayload,
        UpdateInventoryPayload,
        ProductResponse,
        ProductPayload,
        BulkDeletePayload,
        BulkDeleteResponse,
        DashboardReport,
        InventoryMetrics,
        Efficiency,
        WeekBucket,
        RecentProduct,
        InventoryStats,
        SeedResponse,
        SettingsPayload,
        SettingsResponse,
    )),
    tags(
        (name = "inventories", description = "Inventory lifecycle and sharing"),
        (name = "products", description = "Product CRUD and bulk operations"),
        (name = "reporting", description = "Dashboards, stats and CSV export"),
        (name = "seed", description = "Demo-data seeding"),
        (name = "settings", description = "Per-user display settings"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    const ERROR_SCHEMA_NAME: &str = "Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn every_route_is_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/inventories",
            "/api/v1/inventories/{id}",
            "/api/v1/products",
            "/api/v1/products/{id}",
            "/api/v1/products/bulk-delete",
            "/api/v1/dashboard",
            "/api/v1/stats",
            "/api/v1/export",
            "/api/v1/seed",
            "/api/v1/settings",
            "/healthz/ready",
            "/healthz/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in OpenAPI document"
            );
        }
    }
}
