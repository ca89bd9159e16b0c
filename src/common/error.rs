use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{models::form::FieldErrors, services::asset_service::AssetServiceError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] FieldErrors),

    #[error("Parâmetro de consulta inválido: {0}")]
    InvalidQuery(String),

    #[error("Token inválido")]
    InvalidToken,

    // Falha de carga: a mensagem já vem pronta do cliente da coleção
    #[error("{0}")]
    UpstreamError(String),

    #[error(transparent)]
    AssetServiceError(#[from] AssetServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Todos os erros de campo vão juntos para o formulário.
            AppError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": errors,
                }),
            ),
            AppError::InvalidQuery(param) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Parâmetro de consulta inválido: {param}") }),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Token de autenticação inválido ou ausente." }),
            ),
            AppError::UpstreamError(message) => {
                tracing::warn!("Endpoint de coleção indisponível: {}", message);
                (StatusCode::BAD_GATEWAY, json!({ "error": message }))
            }
            AppError::AssetServiceError(err) => {
                (StatusCode::BAD_GATEWAY, json!({ "error": err.to_string() }))
            }
        };

        (status, Json(body)).into_response()
    }
}
