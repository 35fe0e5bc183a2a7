//! # Kiosk Infra
//!
//! Infrastructure adapters implementing the core ports: reqwest transport,
//! token storage backends, and incident monitors.

pub mod monitor;
pub mod token_store;
pub mod transport;
