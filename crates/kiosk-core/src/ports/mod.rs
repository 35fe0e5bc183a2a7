//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod monitor;
mod token_store;
mod transport;

pub use monitor::{ErrorMonitor, Incident, MonitorError};
pub use token_store::{StoreError, TokenStore, TOKENS_STORAGE_KEY, USER_STORAGE_KEY};
pub use transport::{HttpMethod, HttpTransport, RawResponse, RequestParts, TransportError};
