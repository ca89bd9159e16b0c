// src/gateway/token.rs

use async_trait::async_trait;

/// Fornece o token bearer opaco usado nas requisições autorizadas.
/// Emissão, renovação e validade da sessão ficam fora daqui.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Option<String>;
}

// Token da sessão atual, repassado como veio.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenProvider for SessionToken {
    async fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
