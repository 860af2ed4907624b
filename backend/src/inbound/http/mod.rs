//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod health;
pub mod inventories;
pub mod products;
pub mod seed;
pub mod settings;
pub mod state;
pub mod validation;

pub use error::ApiResult;
