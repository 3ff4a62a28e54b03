pub mod repository;

pub use repository::{AnalysisRepository, ChatExchange, ChatSessionRecord, MoleculeRecord,
                     OptimizationRecord};
