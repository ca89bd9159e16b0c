// src/gateway/asset_gateway.rs

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::{
    gateway::api_service::{ApiService, GatewayError, RequestOptions},
    models::asset::{Asset, AssetPatch},
    services::query_builder::ParamMap,
};

const ASSETS_PATH: &str = "assets";

/// Acesso ao endpoint remoto de coleção de ativos.
/// O token, quando houver, vai como `Authorization: Bearer`.
#[async_trait]
pub trait AssetGateway: Send + Sync {
    async fn list(&self, params: &ParamMap, token: Option<&str>) -> Result<Vec<Asset>, GatewayError>;

    async fn create(&self, asset: &Asset, token: Option<&str>) -> Result<Asset, GatewayError>;

    async fn update(&self, id: &str, patch: &AssetPatch, token: Option<&str>) -> Result<Asset, GatewayError>;

    async fn delete(&self, id: &str, token: Option<&str>) -> Result<(), GatewayError>;
}

// Qualquer resposta que não seja um array vira lista vazia.
pub(crate) fn assets_from_value(value: Value) -> Result<Vec<Asset>, GatewayError> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => {
            tracing::warn!("Listagem de ativos não retornou um array: {}", other);
            Ok(Vec::new())
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpAssetGateway {
    api: ApiService,
}

impl HttpAssetGateway {
    pub fn new(api: ApiService) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AssetGateway for HttpAssetGateway {
    async fn list(&self, params: &ParamMap, token: Option<&str>) -> Result<Vec<Asset>, GatewayError> {
        let value: Value = self
            .api
            .request(RequestOptions::get(ASSETS_PATH).with_query(params).with_bearer(token))
            .await?;
        assets_from_value(value)
    }

    async fn create(&self, asset: &Asset, token: Option<&str>) -> Result<Asset, GatewayError> {
        let options = RequestOptions::new(Method::POST, ASSETS_PATH)
            .with_body(serde_json::to_value(asset)?)
            .with_bearer(token);
        self.api.request(options).await
    }

    async fn update(&self, id: &str, patch: &AssetPatch, token: Option<&str>) -> Result<Asset, GatewayError> {
        let options = RequestOptions::new(Method::PUT, ApiService::join_segments(&[ASSETS_PATH, id]))
            .with_body(serde_json::to_value(patch)?)
            .with_bearer(token);
        self.api.request(options).await
    }

    async fn delete(&self, id: &str, token: Option<&str>) -> Result<(), GatewayError> {
        let options = RequestOptions::new(Method::DELETE, ApiService::join_segments(&[ASSETS_PATH, id]))
            .with_bearer(token);
        self.api.send(options).await?;
        Ok(())
    }
}
