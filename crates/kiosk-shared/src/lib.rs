//! # Kiosk Shared
//!
//! Wire-level types shared between the pipeline and its callers: the
//! response envelope, pagination metadata, and request DTOs.

pub mod dto;
pub mod response;

pub use response::{Envelope, ErrorBody, PageMeta, Paginated};
