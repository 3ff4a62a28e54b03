//! Errores específicos del motor (simples por ahora).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cache lock poisoned: {0}")]
    CachePoisoned(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("internal: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_variant_format() {
        let err = EngineError::Internal("boom".into());
        assert_eq!(err.to_string(), "internal: boom");
    }
}
