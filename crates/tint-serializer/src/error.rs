//! Error types for the reverse transform.

/// Errors from [`serialize`](crate::serialize).
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// The parsed document has no `body` element.
    #[error("HTML document has no body")]
    MissingBody,
}
