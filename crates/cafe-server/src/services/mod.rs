//! Business logic services

pub mod auth;

pub use auth::ApiKeyVerifier;
