use thiserror::Error;

use nano_domain::DomainError;
use nano_engine::EngineError;

/// Errores de la capa de servicio, con código de estado asociado para
/// integrarse con una capa HTTP externa.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validación fallida: {0}")]
    InvalidInput(String),
    #[error("Entidad no encontrada: {0}")]
    NotFound(String),
    #[error("Error interno: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Código de estado HTTP sugerido para cada variante.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidInput(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Internal(_) => 500,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ServiceError::InvalidInput(msg),
            DomainError::NotFound(msg) => ServiceError::NotFound(msg),
            DomainError::Generic(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), 404);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_domain_error_maps_to_invalid_input() {
        let err: ServiceError = DomainError::Validation("SMILES vacío".into()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Validación fallida: SMILES vacío");
    }

    #[test]
    fn test_not_found_format() {
        let err = ServiceError::NotFound("Optimización 42".into());
        assert_eq!(err.to_string(), "Entidad no encontrada: Optimización 42");
    }
}
