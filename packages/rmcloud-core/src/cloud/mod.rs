//! Cloud API module.
//!
//! Provides the HTTP client for the token and document endpoints and the
//! endpoint configuration it is built from.

mod client;
pub mod config;

pub use client::{CloudClient, DEVICE_DESC, META_HEADER};
pub use config::{load_endpoint_config, ConfigSource, EndpointConfig};
