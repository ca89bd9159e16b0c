// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- ASSETS ---
        handlers::assets::list_assets,
        handlers::assets::create_asset,
        handlers::assets::update_asset,
        handlers::assets::delete_asset,
    ),
    components(
        schemas(
            // --- Assets ---
            models::asset::AssetCategory,
            models::asset::AssetStatus,
            models::asset::AssetField,
            models::asset::AssetDetails,
            models::asset::Asset,
            models::asset::AssetPatch,

            // --- Consulta / Paginação ---
            models::query::AssetFilters,
            models::query::SortDirection,
            models::query::SortConfig,
            models::query::PaginationConfig,
            models::query::AssetResponse,

            // --- Estado do cliente ---
            services::asset_service::LoadPhase,
            services::asset_service::AssetsState,

            // --- Payloads ---
            models::form::AssetFormInput,
            models::form::FieldErrors,
            handlers::assets::AssetMutationResponse,
        )
    ),
    tags(
        (name = "Assets", description = "Gestão de Ativos (equipamentos, veículos e software)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_asset_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/assets"));
        assert!(doc.paths.paths.contains_key("/api/assets/{id}"));
    }
}
