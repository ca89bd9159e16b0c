pub mod asset;
pub mod form;
pub mod query;
