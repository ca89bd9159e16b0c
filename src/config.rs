// src/config.rs

use anyhow::Context;
use std::{env, sync::Arc};

use crate::{
    gateway::{ApiService, AssetGateway, HttpAssetGateway, SessionToken},
    models::query::DEFAULT_PAGE_LIMIT,
    services::asset_service::AssetCollectionClient,
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub bind_addr: String,
    pub default_page_limit: usize,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let default_page_limit = match env::var("DEFAULT_PAGE_LIMIT") {
            Ok(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("DEFAULT_PAGE_LIMIT inválido: '{raw}'"))?,
            Err(_) => DEFAULT_PAGE_LIMIT,
        };

        Ok(Self {
            api_url: env::var("API_URL").ok(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            default_page_limit: default_page_limit.max(1),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub asset_gateway: Arc<dyn AssetGateway>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = AppConfig::from_env()?;
        // Sem API_URL a aplicação não tem com quem conversar
        let api = ApiService::new(config.api_url.as_deref())?;
        tracing::info!("✅ Endpoint de ativos: {}", api.api_url());

        Ok(Self::with_gateway(config, Arc::new(HttpAssetGateway::new(api))))
    }

    pub fn with_gateway(config: AppConfig, asset_gateway: Arc<dyn AssetGateway>) -> Self {
        Self { config: Arc::new(config), asset_gateway }
    }

    /// Um cliente da coleção por requisição, falando em nome da sessão atual.
    pub fn collection_client(&self, session: SessionToken) -> AssetCollectionClient {
        AssetCollectionClient::new(self.asset_gateway.clone(), Arc::new(session))
            .with_default_limit(self.config.default_page_limit)
    }
}
