//! Shared HTTP client used by the provider integrations.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
