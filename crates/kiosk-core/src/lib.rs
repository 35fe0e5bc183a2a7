//! # Kiosk Core
//!
//! The domain layer of the Kiosk storefront client.
//! This crate contains entities, the error taxonomy, and the ports the
//! pipeline depends on, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::ApiError;
