pub mod auth;
pub mod client;
pub mod dto;
pub mod envelope;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
