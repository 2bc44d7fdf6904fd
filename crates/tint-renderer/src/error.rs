//! Error types for the forward transform.

/// Failure inside the markdown engine or a directive handler.
///
/// Malformed directives and invalid parameters never produce this error;
/// they stay literal text and are reported as warnings instead.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("markdown engine failed: {0}")]
    Engine(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RenderError::Engine("boom".to_owned());
        assert_eq!(err.to_string(), "markdown engine failed: boom");
    }
}
