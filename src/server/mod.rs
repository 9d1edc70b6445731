//! Endpoint assembly and configuration

pub mod builder;
pub mod config;

pub use builder::{Endpoint, EndpointBuilder};
pub use config::EndpointConfig;
