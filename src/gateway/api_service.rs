// src/gateway/api_service.rs

use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::services::query_builder::ParamMap;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Url da API não disponível, verifique com o administrador e tente mais tarde.")]
    MissingApiUrl,

    #[error("URL inválida: {0}")]
    InvalidUrl(String),

    #[error("Falha na requisição HTTP: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Erro HTTP! status: {status}")]
    Status { status: u16, body: String },

    #[error("Resposta inválida do servidor: {0}")]
    Decode(#[from] serde_json::Error),
}

// Opções de uma requisição ao endpoint de coleção.
#[derive(Debug, Clone)]
pub struct RequestOptions<'a> {
    pub method: Method,
    pub path: String,
    pub query_params: Option<&'a ParamMap>,
    pub body: Option<Value>,
    pub bearer: Option<&'a str>,
}

impl<'a> RequestOptions<'a> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query_params: None, body: None, bearer: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn with_query(mut self, params: &'a ParamMap) -> Self {
        self.query_params = Some(params);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: Option<&'a str>) -> Self {
        self.bearer = token;
        self
    }
}

/// Cliente HTTP fino sobre a URL base do endpoint.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: reqwest::Client,
    api_url: String,
}

impl ApiService {
    pub fn new(api_url: Option<&str>) -> Result<Self, GatewayError> {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: Option<&str>) -> Result<Self, GatewayError> {
        Ok(Self { client, api_url: Self::verify_api_url(api_url)? })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn verify_api_url(url: Option<&str>) -> Result<String, GatewayError> {
        match url.map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url.trim_end_matches('/').to_string()),
            _ => Err(GatewayError::MissingApiUrl),
        }
    }

    // "assets" -> "/assets"; o resto do caminho fica como veio.
    pub fn normalize_path(path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        }
    }

    // ["/assets/", "42"] -> "/assets/42"
    pub fn join_segments(parts: &[&str]) -> String {
        let joined: Vec<&str> = parts.iter().map(|p| p.trim_matches('/')).collect();
        format!("/{}", joined.join("/"))
    }

    pub fn build_url(&self, path: &str, params: Option<&ParamMap>) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&format!("{}{}", self.api_url, Self::normalize_path(path)))
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter() {
                pairs.append_pair(key, &value.to_string());
            }
        }
        Ok(url)
    }

    /// Envia a requisição e falha em qualquer status fora de 2xx.
    pub async fn send(&self, options: RequestOptions<'_>) -> Result<Response, GatewayError> {
        let url = self.build_url(&options.path, options.query_params)?;
        tracing::debug!("{} {}", options.method, url);

        let mut builder = self.client.request(options.method.clone(), url);
        if let Some(token) = options.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = options.body.filter(|_| options.method != Method::GET) {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Endpoint respondeu {} para {}", status, options.path);
            return Err(GatewayError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    pub async fn request<T: DeserializeOwned>(&self, options: RequestOptions<'_>) -> Result<T, GatewayError> {
        let response = self.send(options).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_url_is_rejected() {
        assert!(matches!(ApiService::new(None), Err(GatewayError::MissingApiUrl)));
        assert!(matches!(ApiService::new(Some("  ")), Err(GatewayError::MissingApiUrl)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = ApiService::new(Some("http://api.local/")).unwrap();
        assert_eq!(api.api_url(), "http://api.local");
    }

    #[test]
    fn paths_are_normalized() {
        assert_eq!(ApiService::normalize_path("assets"), "/assets");
        assert_eq!(ApiService::normalize_path("/assets/1"), "/assets/1");
        assert_eq!(ApiService::join_segments(&["/assets/", "42"]), "/assets/42");
        assert_eq!(ApiService::join_segments(&["users"]), "/users");
    }

    #[test]
    fn query_params_are_url_encoded_in_order() {
        let api = ApiService::new(Some("http://api.local")).unwrap();
        let mut params = ParamMap::new();
        params.insert("q", "Note Book");
        params.insert("status", "Em manutenção");
        params.insert("_page", 2usize);

        let url = api.build_url("assets", Some(&params)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://api.local/assets?q=Note+Book&status=Em+manuten%C3%A7%C3%A3o&_page=2"
        );
    }

    #[test]
    fn empty_params_leave_no_query_string() {
        let api = ApiService::new(Some("http://api.local")).unwrap();
        let url = api.build_url("/assets", Some(&ParamMap::new())).unwrap();
        assert_eq!(url.as_str(), "http://api.local/assets");
    }

    #[test]
    fn status_error_mentions_code() {
        let err = GatewayError::Status { status: 503, body: String::new() };
        assert_eq!(err.to_string(), "Erro HTTP! status: 503");
    }
}
