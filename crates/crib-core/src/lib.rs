//! Core crib library (config, backend client, credential storage).

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod store;
