//! # Kiosk Client
//!
//! The request/error pipeline of the storefront SDK: a declarative request
//! executor with bearer auth, bounded retry and cancellation, a closed
//! error classification, and one service façade per backend resource.

pub mod classify;
pub mod config;
pub mod executor;
pub mod request;
pub mod retry;
pub mod services;

pub use config::ClientConfig;
pub use executor::Executor;
pub use request::ApiRequest;
pub use retry::RetryPolicy;
pub use services::KioskApi;
