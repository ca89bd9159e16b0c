pub mod api_service;
pub use api_service::{ApiService, GatewayError};
pub mod asset_gateway;
pub use asset_gateway::{AssetGateway, HttpAssetGateway};
pub mod token;
pub use token::{SessionToken, TokenProvider};
