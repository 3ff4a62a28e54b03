use thiserror::Error;

/// Errores del dominio nanofarmacéutico.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entidad no encontrada: {0}")]
    NotFound(String),
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Error genérico de dominio: {0}")]
    Generic(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variant_format() {
        let err = DomainError::NotFound("Optimization 42".into());
        assert_eq!(err.to_string(), "Entidad no encontrada: Optimization 42");
    }

    #[test]
    fn test_validation_variant_format() {
        let err = DomainError::Validation("SMILES inválido".into());
        assert_eq!(err.to_string(), "Validación fallida: SMILES inválido");
    }
}
