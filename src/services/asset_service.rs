// src/services/asset_service.rs

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use utoipa::ToSchema;

use crate::{
    gateway::{AssetGateway, GatewayError, TokenProvider},
    models::{
        asset::{Asset, AssetPatch},
        query::{AssetQuery, AssetResponse, DEFAULT_PAGE_LIMIT},
    },
    services::{asset_engine::derive_page, query_builder::build_query},
};

// A mensagem (Display) é o que o usuário vê; a causa fica na `source`.
#[derive(Debug, Error)]
pub enum AssetServiceError {
    #[error("Falha ao carregar os Ativos. Tente novamente.")]
    Load(#[source] GatewayError),

    #[error("Falha ao criar o ativo. Tente novamente.")]
    Create(#[source] GatewayError),

    #[error("Falha ao atualizar o ativo. Tente novamente.")]
    Update(#[source] GatewayError),

    #[error("Falha ao excluir o ativo. Tente novamente.")]
    Delete(#[source] GatewayError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetsState {
    pub data: AssetResponse,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: LoadPhase,
}

/// Cliente da coleção de ativos: único dono de `data`, `loading` e `error`.
///
/// Cada operação recomeça em `loading`. Mutações só retornam depois que a
/// recarga (consulta padrão) terminou, então quem chamou já enxerga os dados
/// novos. Cada transição é publicada para quem chamou `subscribe`.
pub struct AssetCollectionClient {
    gateway: Arc<dyn AssetGateway>,
    tokens: Arc<dyn TokenProvider>,
    default_limit: usize,
    state: AssetsState,
    updates: watch::Sender<AssetsState>,
}

impl AssetCollectionClient {
    pub fn new(gateway: Arc<dyn AssetGateway>, tokens: Arc<dyn TokenProvider>) -> Self {
        let state = AssetsState::default();
        let (updates, _) = watch::channel(state.clone());
        Self { gateway, tokens, default_limit: DEFAULT_PAGE_LIMIT, state, updates }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    pub fn state(&self) -> &AssetsState {
        &self.state
    }

    pub fn data(&self) -> &AssetResponse {
        &self.state.data
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn subscribe(&self) -> watch::Receiver<AssetsState> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }

    fn begin(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        self.state.phase = LoadPhase::Loading;
        self.publish();
    }

    fn fail(&mut self, err: &AssetServiceError) {
        match std::error::Error::source(err) {
            Some(cause) => tracing::error!("{} Causa: {}", err, cause),
            None => tracing::error!("{}", err),
        }
        self.state.loading = false;
        self.state.error = Some(err.to_string());
        self.state.phase = LoadPhase::Error;
        self.publish();
    }

    async fn fetch_page(&self, query: &AssetQuery) -> Result<AssetResponse, AssetServiceError> {
        // O endpoint devolve a coleção inteira; a paginação é sempre feita aqui.
        let params = build_query(&query.without_paging());
        let token = self.tokens.token().await;
        let assets = self
            .gateway
            .list(&params, token.as_deref())
            .await
            .map_err(AssetServiceError::Load)?;
        Ok(derive_page(&assets, query, self.default_limit))
    }

    /// Falha de transporte deixa `data` como estava e guarda a mensagem.
    pub async fn load_assets(&mut self, query: AssetQuery) {
        self.begin();
        match self.fetch_page(&query).await {
            Ok(page) => {
                tracing::debug!("{} ativo(s) carregado(s), página {}/{}", page.total, page.page, page.total_pages);
                self.state.data = page;
                self.state.loading = false;
                self.state.phase = LoadPhase::Success;
                self.publish();
            }
            Err(err) => self.fail(&err),
        }
    }

    pub async fn refresh_assets(&mut self) {
        self.load_assets(AssetQuery::default()).await;
    }

    async fn finish_mutation<T>(&mut self, result: Result<T, AssetServiceError>) -> Result<T, AssetServiceError> {
        match result {
            Ok(value) => {
                self.refresh_assets().await;
                Ok(value)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn create_new_asset(&mut self, asset: Asset) -> Result<Asset, AssetServiceError> {
        self.begin();
        let now = Utc::now();
        let asset = Asset { created_at: Some(now), updated_at: Some(now), ..asset };

        let token = self.tokens.token().await;
        let result = self
            .gateway
            .create(&asset, token.as_deref())
            .await
            .map_err(AssetServiceError::Create);
        if result.is_ok() {
            tracing::info!("Ativo '{}' criado", asset.id);
        }
        self.finish_mutation(result).await
    }

    pub async fn update_existing_asset(&mut self, id: &str, patch: AssetPatch) -> Result<Asset, AssetServiceError> {
        self.begin();
        let patch = AssetPatch { updated_at: Some(Utc::now()), ..patch };

        let token = self.tokens.token().await;
        let result = self
            .gateway
            .update(id, &patch, token.as_deref())
            .await
            .map_err(AssetServiceError::Update);
        if result.is_ok() {
            tracing::info!("Ativo '{}' atualizado", id);
        }
        self.finish_mutation(result).await
    }

    /// Sem alvo (id vazio) não há o que excluir: nada é enviado.
    pub async fn delete_existing_asset(&mut self, id: &str) -> Result<(), AssetServiceError> {
        if id.is_empty() {
            tracing::debug!("Exclusão ignorada: nenhum ativo selecionado");
            return Ok(());
        }

        self.begin();
        let token = self.tokens.token().await;
        let result = self
            .gateway
            .delete(id, token.as_deref())
            .await
            .map_err(AssetServiceError::Delete);
        if result.is_ok() {
            tracing::info!("Ativo '{}' excluído", id);
        }
        self.finish_mutation(result).await
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
        self.publish();
    }
}
