//! Error types for message ingestion and action planning

use thiserror::Error;

/// Errors that can occur while ingesting messages or planning actions.
///
/// Extraction itself never fails: malformed headers and bodies degrade to
/// "no link found". These variants only surface at the boundaries where a
/// message enters the crate or an action leaves it.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to parse the raw message structure
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Failed to decode a provider wire resource
    #[error("Failed to decode message resource: {0}")]
    Decode(String),

    /// A mailto URI that cannot drive an unsubscribe action
    #[error("Invalid mailto link: {0}")]
    InvalidMailto(String),
}

/// Result type for ingestion and action-planning operations
pub type Result<T> = std::result::Result<T, ExtractError>;
