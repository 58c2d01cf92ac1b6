//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health, requests};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Maintenance Desk API",
        version = "0.1.0",
        description = "Equipment and maintenance request tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Maintenance requests
        requests::create_request,
        requests::list_requests,
        requests::get_request,
        requests::update_request,
        requests::delete_request,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
    ),
    components(
        schemas(
            // Maintenance requests
            crate::models::request::MaintenanceRequest,
            crate::models::request::CreateMaintenanceRequest,
            crate::models::request::UpdateMaintenanceRequest,
            crate::models::request::RequestQuery,
            crate::models::request::DeleteResponse,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "requests", description = "Maintenance request management"),
        (name = "equipment", description = "Equipment management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
