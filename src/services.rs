pub mod asset_engine;
pub mod asset_service;
pub mod query_builder;
pub mod validation_service;
