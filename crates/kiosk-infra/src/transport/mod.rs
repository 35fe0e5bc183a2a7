//! HTTP transport adapters.

mod reqwest;

pub use reqwest::ReqwestTransport;
