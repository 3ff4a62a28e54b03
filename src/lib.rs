//! NanoFlow Rust Library
//!
//! Este crate actúa como la capa de servicio de NanoFlow:
//! - Expone `pipeline` con el orquestador de análisis completo.
//! - Expone `database` para persistencia de moléculas, optimizaciones y chat.
//! - Expone `providers` con los colaboradores externos (lookup, chat).
//! - Expone `errors` y `config` para el manejo de errores y configuración.
//!
//! Puede usarse desde `main.rs` o por otros clientes.

pub mod config;
pub mod database;
pub mod errors;
pub mod pipeline;
pub mod providers;

pub use pipeline::{AnalysisPipeline, AnalysisReport, ChatReply};

#[cfg(test)]
mod tests {
    use super::errors::ServiceError;

    #[test]
    fn service_error_tests() {
        let i = ServiceError::Internal("fallo".into()).to_string();
        assert_eq!(i, "Error interno: fallo");
        let v = ServiceError::InvalidInput("x".into()).to_string();
        assert_eq!(v, "Validación fallida: x");
    }
}
