//! Front-end de gestão de ativos: modelo por categoria, validação do
//! formulário, filtro/ordenação/paginação e o cliente da coleção remota.

pub mod common;
pub mod config;
pub mod docs;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::session_guard};

/// Monta o router completo (usado pelo binário e pelos testes de integração).
pub fn build_router(app_state: AppState) -> Router {
    let asset_routes = Router::new()
        .route("/", get(handlers::assets::list_assets).post(handlers::assets::create_asset))
        .route(
            "/{id}",
            put(handlers::assets::update_asset).delete(handlers::assets::delete_asset),
        )
        .layer(axum_middleware::from_fn(session_guard));

    let cors = match app_state.config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            tracing::warn!("CORS_ORIGIN inválido: {}", app_state.config.cors_origin);
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
    .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT]);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/assets", asset_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
