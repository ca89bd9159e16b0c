// src/handlers/assets.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentSession,
    models::{
        asset::{Asset, AssetField, AssetPatch},
        form::AssetFormInput,
        query::{AssetFilters, AssetQuery, AssetResponse, SortConfig, SortDirection},
    },
    services::{
        asset_service::{AssetCollectionClient, AssetsState},
        validation_service,
    },
};

// ---
// Query: parâmetros da listagem (como a tela os envia)
// ---
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAssetsParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    // Texto para que `?page=` vazio ou inválido caia no mesmo 400 em JSON
    #[param(value_type = Option<usize>)]
    pub page: Option<String>,
    #[param(value_type = Option<usize>)]
    pub limit: Option<String>,
}

impl ListAssetsParams {
    // Texto vazio = sem filtro; qualquer outro valor precisa ser conhecido.
    fn parse_choice<T: std::str::FromStr>(raw: &str, param: &str) -> Result<Option<T>, AppError> {
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| AppError::InvalidQuery(param.to_string()))
    }

    fn parse_number(raw: Option<&str>, param: &str) -> Result<Option<usize>, AppError> {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| AppError::InvalidQuery(param.to_string())),
            None => Ok(None),
        }
    }

    pub fn into_query(self) -> Result<AssetQuery, AppError> {
        let filters = AssetFilters {
            category: Self::parse_choice(&self.category, "category")?,
            status: Self::parse_choice(&self.status, "status")?,
            name: self.name,
        };

        let sort = match self.sort_by.as_deref().filter(|key| !key.is_empty()) {
            Some(key) => {
                let key = key
                    .parse::<AssetField>()
                    .map_err(|_| AppError::InvalidQuery("sortBy".to_string()))?;
                let direction = match self.sort_order.as_deref() {
                    None | Some("") | Some("asc") => SortDirection::Asc,
                    Some("desc") => SortDirection::Desc,
                    Some(_) => return Err(AppError::InvalidQuery("sortOrder".to_string())),
                };
                Some(SortConfig { key, direction })
            }
            None => None,
        };

        Ok(AssetQuery {
            filters: Some(filters),
            sort,
            page: Self::parse_number(self.page.as_deref(), "page")?,
            limit: Self::parse_number(self.limit.as_deref(), "limit")?,
        })
    }
}

// Resposta das mutações: o ativo afetado e a primeira página recarregada.
// Se a recarga falhar, `data` fica como estava e `error` traz a mensagem.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssetMutationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
    pub data: AssetResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssetMutationResponse {
    fn after(asset: Option<Asset>, client: &AssetCollectionClient) -> Self {
        Self {
            asset,
            data: client.data().clone(),
            error: client.error().map(str::to_owned),
        }
    }
}

// ---
// Handler: list_assets
// ---
#[utoipa::path(
    get,
    path = "/api/assets",
    tag = "Assets",
    params(ListAssetsParams),
    responses(
        (status = 200, description = "Página de ativos já filtrada e ordenada", body = AssetsState),
        (status = 400, description = "Parâmetro de consulta inválido"),
        (status = 502, description = "Endpoint de coleção indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_assets(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<ListAssetsParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = params.into_query()?;

    let mut client = app_state.collection_client(session);
    client.load_assets(query).await;

    if let Some(message) = client.error() {
        return Err(AppError::UpstreamError(message.to_string()));
    }
    Ok((StatusCode::OK, Json(client.state().clone())))
}

// ---
// Handler: create_asset
// ---
#[utoipa::path(
    post,
    path = "/api/assets",
    tag = "Assets",
    request_body = AssetFormInput,
    responses(
        (status = 201, description = "Ativo criado", body = AssetMutationResponse),
        (status = 400, description = "Campos inválidos (um erro por campo)"),
        (status = 502, description = "Falha no endpoint de coleção")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_asset(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<AssetFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let asset = validation_service::validate(&payload, None)?;

    let mut client = app_state.collection_client(session);
    let created = client.create_new_asset(asset).await?;

    Ok((StatusCode::CREATED, Json(AssetMutationResponse::after(Some(created), &client))))
}

// ---
// Handler: update_asset
// ---
#[utoipa::path(
    put,
    path = "/api/assets/{id}",
    tag = "Assets",
    request_body = AssetFormInput,
    params(
        ("id" = String, Path, description = "ID do ativo")
    ),
    responses(
        (status = 200, description = "Ativo atualizado", body = AssetMutationResponse),
        (status = 400, description = "Campos inválidos (um erro por campo)"),
        (status = 502, description = "Falha no endpoint de coleção")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_asset(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(payload): Json<AssetFormInput>,
) -> Result<impl IntoResponse, AppError> {
    let asset = validation_service::validate(&payload, Some(&id))?;

    let mut client = app_state.collection_client(session);
    let updated = client.update_existing_asset(&id, AssetPatch::from(asset)).await?;

    Ok((StatusCode::OK, Json(AssetMutationResponse::after(Some(updated), &client))))
}

// ---
// Handler: delete_asset
// ---
#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(
        ("id" = String, Path, description = "ID do ativo")
    ),
    responses(
        (status = 200, description = "Ativo excluído", body = AssetMutationResponse),
        (status = 502, description = "Falha no endpoint de coleção")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_asset(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut client = app_state.collection_client(session);
    client.delete_existing_asset(&id).await?;

    Ok((StatusCode::OK, Json(AssetMutationResponse::after(None, &client))))
}
