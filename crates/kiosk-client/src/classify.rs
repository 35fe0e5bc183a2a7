//! Error classification - one failure vocabulary at the boundary.
//!
//! Everything the executor catches goes through [`classify`] exactly once
//! before reaching a caller. First matching rule wins; already-classified
//! errors pass through unchanged, so re-classification is idempotent.

use serde_json::Value;

use kiosk_core::ApiError;
use kiosk_core::ports::TransportError;
use kiosk_shared::ErrorBody;

/// A failure caught inside the executor, before classification.
#[derive(Debug)]
pub enum Caught {
    /// The exchange never produced an HTTP status.
    Transport(TransportError),
    /// The server answered with a non-2xx status, or a 2xx envelope whose
    /// success flag was false.
    Http { status: u16, body: ErrorBody },
    /// The response body was not the JSON we expected.
    Decode(String),
    /// Already went through classification on a lower layer.
    Classified(ApiError),
}

/// Map an arbitrary caught failure into exactly one taxonomy variant.
pub fn classify(caught: Caught) -> ApiError {
    match caught {
        Caught::Transport(TransportError::Offline(_)) => {
            ApiError::network("Cannot reach the server. Check your connection.")
        }
        Caught::Transport(TransportError::Timeout(_)) => {
            ApiError::timeout("The request timed out. Please try again.")
        }
        Caught::Transport(TransportError::Cancelled) => {
            ApiError::timeout("The request was cancelled.")
        }
        Caught::Transport(TransportError::Failed(detail)) => {
            ApiError::network(format!("Request failed to complete: {detail}"))
        }
        Caught::Http { status, body } => classify_status(status, body),
        Caught::Decode(detail) => {
            ApiError::api(format!("Unexpected response payload: {detail}"), 500, None, None)
        }
        Caught::Classified(error) => error,
    }
}

fn classify_status(status: u16, body: ErrorBody) -> ApiError {
    let message = body
        .message
        .clone()
        .unwrap_or_else(|| format!("HTTP {status}: {}", status_text(status)));

    match status {
        401 => ApiError::unauthorized(message),
        403 => ApiError::forbidden(message),
        404 => ApiError::not_found(message),
        422 => ApiError::validation(message, body.field_errors()),
        500 | 502 | 503 => ApiError::server(message, status),
        _ => {
            let details = {
                let fields = body.field_errors();
                if fields.is_empty() {
                    None
                } else {
                    serde_json::to_value(fields).ok()
                }
            };
            ApiError::api(message, status, body.error.clone(), details)
        }
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown Status",
    }
}

/// Details carried by a generic error, exposed for call sites that need
/// the raw field map back.
pub fn details_as_fields(details: &Value) -> Option<kiosk_core::error::FieldErrors> {
    serde_json::from_value(details.clone()).ok()
}
