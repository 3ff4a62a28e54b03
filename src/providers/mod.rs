//! Colaboradores externos del pipeline, detrás de traits async para poder
//! sustituirlos por clientes reales (PubChem, un LLM) sin tocar el pipeline.

pub mod chat;
pub mod lookup;

pub use chat::{ChatResponder, KeywordChatResponder};
pub use lookup::{LocalLookupProvider, MolecularLookupProvider};
