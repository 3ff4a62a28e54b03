//! Asistente conversacional sobre nanofármacos.
//!
//! La implementación por defecto responde con textos fijos seleccionados por
//! palabras clave; el trait permite conectar un modelo generativo real.

use async_trait::async_trait;

use crate::database::ChatExchange;
use crate::errors::ServiceError;

pub const APOLOGY: &str =
    "I'm sorry, I'm having trouble processing your request. Please try again later.";

#[async_trait]
pub trait ChatResponder: Send + Sync {
    fn get_name(&self) -> &str;

    /// Responde un mensaje con los intercambios previos de la sesión a mano.
    async fn respond(&self, message: &str, history: &[ChatExchange])
                     -> Result<String, ServiceError>;
}

/// Respuestas fijas por palabra clave, evaluadas en orden: propiedades,
/// optimización, toxicidad y un texto por defecto.
#[derive(Debug, Default)]
pub struct KeywordChatResponder;

#[async_trait]
impl ChatResponder for KeywordChatResponder {
    fn get_name(&self) -> &str {
        "keyword_responder"
    }

    async fn respond(&self, message: &str, _history: &[ChatExchange])
                     -> Result<String, ServiceError> {
        let lower = message.to_lowercase();
        let reply = if lower.contains("property") || lower.contains("properties") {
            "Molecular properties such as molecular weight, LogP, and hydrogen bond \
             donors/acceptors are crucial for determining drug efficacy. These properties \
             affect solubility, bioavailability, and the ability to cross biological barriers."
        } else if lower.contains("optimize") || lower.contains("optimization")
                  || lower.contains("nanoparticle")
        {
            "Nanoparticle optimization involves selecting the optimal size, surface charge, \
             coating materials, and drug loading methods. For most drug molecules, a size \
             between 50-200nm and a slightly negative charge often provides the best balance \
             of circulation time and cellular uptake."
        } else if lower.contains("toxic") || lower.contains("toxicity") || lower.contains("safety")
        {
            "Nanoparticle toxicity is influenced by size, charge, shape, and coating \
             materials. Smaller particles (below 50nm) may have higher toxicity due to \
             increased cellular penetration. PEG coatings are often used to reduce \
             immunogenicity and toxicity."
        } else {
            "I'm here to help with questions about nanoparticle drug delivery systems, \
             molecular properties, optimization strategies, or specific drug molecules. \
             Please feel free to ask anything related to these topics, and I'll provide \
             scientific information to assist your research."
        };
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_property_keyword() {
        let r = KeywordChatResponder;
        let reply = r.respond("What properties matter for my drug?", &[]).await.unwrap();
        assert!(reply.contains("Molecular properties"));
    }

    #[tokio::test]
    async fn test_optimization_keyword() {
        let r = KeywordChatResponder;
        let reply = r.respond("How do I OPTIMIZE a nanoparticle?", &[]).await.unwrap();
        assert!(reply.contains("Nanoparticle optimization"));
    }

    #[tokio::test]
    async fn test_toxicity_keyword() {
        let r = KeywordChatResponder;
        let reply = r.respond("Is this formulation toxic?", &[]).await.unwrap();
        assert!(reply.contains("toxicity"));
    }

    #[tokio::test]
    async fn test_default_reply() {
        let r = KeywordChatResponder;
        let reply = r.respond("hello there", &[]).await.unwrap();
        assert!(reply.contains("drug delivery systems"));
    }
}
