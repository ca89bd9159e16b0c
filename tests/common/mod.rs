//! Infraestrutura compartilhada dos testes de integração.
//!
//! O router real é montado sobre um gateway em memória, então nenhum
//! endpoint remoto é necessário.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gestao_ativos::{
    build_router,
    config::{AppConfig, AppState},
    gateway::{AssetGateway, GatewayError},
    models::asset::{Asset, AssetPatch},
    services::query_builder::ParamMap,
};

pub const TOKEN: &str = "token-de-teste";

// --- Gateway em memória ---

#[derive(Default)]
pub struct MemoryGateway {
    pub assets: Mutex<Vec<Asset>>,
    pub tokens_seen: Mutex<Vec<Option<String>>>,
    pub list_params: Mutex<Vec<ParamMap>>,
    pub fail_list: AtomicBool,
    pub fail_mutations: AtomicBool,
}

impl MemoryGateway {
    pub fn with_assets(assets: Vec<Asset>) -> Self {
        Self { assets: Mutex::new(assets), ..Default::default() }
    }

    pub fn fail_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self) {
        self.fail_mutations.store(true, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), GatewayError> {
        if flag.load(Ordering::SeqCst) {
            return Err(GatewayError::Status { status: 503, body: "indisponível".into() });
        }
        Ok(())
    }
}

#[async_trait]
impl AssetGateway for MemoryGateway {
    async fn list(&self, params: &ParamMap, token: Option<&str>) -> Result<Vec<Asset>, GatewayError> {
        self.list_params.lock().unwrap().push(params.clone());
        self.tokens_seen.lock().unwrap().push(token.map(str::to_owned));
        self.check(&self.fail_list)?;
        Ok(self.assets.lock().unwrap().clone())
    }

    async fn create(&self, asset: &Asset, token: Option<&str>) -> Result<Asset, GatewayError> {
        self.tokens_seen.lock().unwrap().push(token.map(str::to_owned));
        self.check(&self.fail_mutations)?;
        self.assets.lock().unwrap().push(asset.clone());
        Ok(asset.clone())
    }

    async fn update(&self, id: &str, patch: &AssetPatch, token: Option<&str>) -> Result<Asset, GatewayError> {
        self.tokens_seen.lock().unwrap().push(token.map(str::to_owned));
        self.check(&self.fail_mutations)?;
        let mut assets = self.assets.lock().unwrap();
        let asset = assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(GatewayError::Status { status: 404, body: String::new() })?;
        if let Some(name) = &patch.name {
            asset.name = name.clone();
        }
        if let Some(status) = patch.status {
            asset.status = status;
        }
        asset.updated_at = patch.updated_at;
        Ok(asset.clone())
    }

    async fn delete(&self, id: &str, token: Option<&str>) -> Result<(), GatewayError> {
        self.tokens_seen.lock().unwrap().push(token.map(str::to_owned));
        self.check(&self.fail_mutations)?;
        self.assets.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }
}

// --- Fixtures ---

pub fn asset(json: Value) -> Asset {
    serde_json::from_value(json).expect("fixture de ativo inválida")
}

pub fn equipment(id: &str, name: &str, acquisition_date: &str) -> Asset {
    asset(serde_json::json!({
        "id": id,
        "name": name,
        "status": "Ativo",
        "acquisitionDate": acquisition_date,
        "category": "Equipamento",
        "serialNumber": format!("SN-{id}"),
        "supplier": "Dell",
    }))
}

pub fn vehicle(id: &str, name: &str, acquisition_date: &str) -> Asset {
    asset(serde_json::json!({
        "id": id,
        "name": name,
        "status": "Em manutenção",
        "acquisitionDate": acquisition_date,
        "category": "Veículo",
        "licensePlate": format!("ABC-{id}"),
    }))
}

// --- App ---

pub fn test_config() -> AppConfig {
    AppConfig {
        api_url: Some("http://colecao.test".into()),
        bind_addr: "127.0.0.1:0".into(),
        default_page_limit: 10,
        cors_origin: "http://localhost:3000".into(),
    }
}

pub fn build_test_app(gateway: Arc<MemoryGateway>) -> Router {
    build_router(AppState::with_gateway(test_config(), gateway))
}

// --- Requisições ---

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(TOKEN)).await
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(TOKEN)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(TOKEN)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(TOKEN)).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("resposta não é JSON")
}
