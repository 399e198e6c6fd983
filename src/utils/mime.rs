//! MIME type constants for HTTP responses.

/// Common MIME type constants.
pub mod types {
    pub const JSON: &str = "application/json";
}
