//! Repositorio de persistencia para moléculas, optimizaciones y sesiones de chat.
//! Proporciona almacenamiento en memoria (rápido para tests y prototipos); la
//! interfaz async deja el camino abierto a un backend SQL sin tocar el pipeline.
//!
//! Responsabilidades clave:
//! - Registrar cada molécula analizada una sola vez (find-or-create por SMILES).
//! - Guardar optimizaciones con su formulación, scores y molécula de origen.
//! - Mantener sesiones de chat con su historial ordenado de intercambios.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use nano_domain::{Formulation, ScoreTriple};

use crate::errors::ServiceError;

/// Molécula registrada, identificada por su SMILES normalizado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoleculeRecord {
    pub id: Uuid,
    pub smiles: String,
    pub created_at: DateTime<Utc>,
}

/// Resultado persistido de una optimización: formulación + scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRecord {
    pub id: Uuid,
    pub molecule_id: Uuid,
    pub formulation: Formulation,
    pub scores: ScoreTriple,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user: String,
    pub assistant: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSessionRecord {
    pub session_id: String,
    pub exchanges: Vec<ChatExchange>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Stores {
    molecules: HashMap<Uuid, MoleculeRecord>,
    molecules_by_smiles: HashMap<String, Uuid>,
    optimizations: HashMap<Uuid, OptimizationRecord>,
    chat_sessions: HashMap<String, ChatSessionRecord>,
}

#[derive(Clone, Default)]
pub struct AnalysisRepository {
    stores: Arc<tokio::sync::RwLock<Stores>>,
}

impl AnalysisRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve la molécula registrada para el SMILES, creándola si no existe.
    pub async fn find_or_create_molecule(&self, smiles: &str) -> MoleculeRecord {
        let mut guard = self.stores.write().await;
        if let Some(id) = guard.molecules_by_smiles.get(smiles) {
            return guard.molecules[id].clone();
        }
        let record = MoleculeRecord { id: Uuid::new_v4(),
                                      smiles: smiles.to_string(),
                                      created_at: Utc::now() };
        guard.molecules_by_smiles.insert(smiles.to_string(), record.id);
        guard.molecules.insert(record.id, record.clone());
        record
    }

    pub async fn get_molecule(&self, id: Uuid) -> Result<MoleculeRecord, ServiceError> {
        self.stores
            .read()
            .await
            .molecules
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Molécula {id}")))
    }

    pub async fn save_optimization(&self, molecule_id: Uuid, formulation: Formulation,
                                   scores: ScoreTriple)
                                   -> OptimizationRecord {
        let record = OptimizationRecord { id: Uuid::new_v4(),
                                          molecule_id,
                                          formulation,
                                          scores,
                                          created_at: Utc::now() };
        self.stores.write().await.optimizations.insert(record.id, record.clone());
        record
    }

    pub async fn get_optimization(&self, id: Uuid) -> Result<OptimizationRecord, ServiceError> {
        self.stores
            .read()
            .await
            .optimizations
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Optimización {id}")))
    }

    /// Optimizaciones de una molécula, más reciente primero.
    pub async fn list_optimizations_for(&self, molecule_id: Uuid) -> Vec<OptimizationRecord> {
        let guard = self.stores.read().await;
        let mut records: Vec<OptimizationRecord> = guard.optimizations
                                                        .values()
                                                        .filter(|r| r.molecule_id == molecule_id)
                                                        .cloned()
                                                        .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    pub async fn get_or_create_session(&self, session_id: &str) -> ChatSessionRecord {
        let mut guard = self.stores.write().await;
        guard.chat_sessions
             .entry(session_id.to_string())
             .or_insert_with(|| ChatSessionRecord { session_id: session_id.to_string(),
                                                    exchanges: Vec::new(),
                                                    created_at: Utc::now() })
             .clone()
    }

    /// Agrega un intercambio al final del historial de la sesión.
    pub async fn append_exchange(&self, session_id: &str, user: &str, assistant: &str) {
        let mut guard = self.stores.write().await;
        let session =
            guard.chat_sessions
                 .entry(session_id.to_string())
                 .or_insert_with(|| ChatSessionRecord { session_id: session_id.to_string(),
                                                        exchanges: Vec::new(),
                                                        created_at: Utc::now() });
        session.exchanges.push(ChatExchange { user: user.to_string(),
                                              assistant: assistant.to_string() });
    }

    pub async fn chat_history(&self, session_id: &str) -> Vec<ChatExchange> {
        self.stores
            .read()
            .await
            .chat_sessions
            .get(session_id)
            .map(|s| s.exchanges.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_formulation() -> Formulation {
        Formulation { nanoparticle_type: String::from("Polymeric Nanoparticle"),
                      coating: String::from("PEG-PLGA"),
                      size_nm: 100.0,
                      surface_charge_mv: -15.0,
                      loading_method: String::from("Encapsulation"),
                      type_rationale: String::new(),
                      coating_rationale: String::new(),
                      size_rationale: String::new(),
                      charge_rationale: String::new(),
                      loading_rationale: String::new(),
                      summary: String::new() }
    }

    #[tokio::test]
    async fn test_find_or_create_is_idempotent() {
        let repo = AnalysisRepository::new();
        let a = repo.find_or_create_molecule("CCO").await;
        let b = repo.find_or_create_molecule("CCO").await;
        assert_eq!(a.id, b.id);
        let c = repo.find_or_create_molecule("CCN").await;
        assert_ne!(a.id, c.id);
    }

    #[tokio::test]
    async fn test_optimization_round_trip() {
        let repo = AnalysisRepository::new();
        let molecule = repo.find_or_create_molecule("CCO").await;
        let saved = repo.save_optimization(molecule.id,
                                           sample_formulation(),
                                           ScoreTriple::fallback())
                        .await;
        let loaded = repo.get_optimization(saved.id).await.unwrap();
        assert_eq!(loaded.molecule_id, molecule.id);
        assert_eq!(loaded.formulation.coating, "PEG-PLGA");
    }

    #[tokio::test]
    async fn test_missing_optimization_is_not_found() {
        let repo = AnalysisRepository::new();
        let err = repo.get_optimization(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_optimizations_filters_by_molecule() {
        let repo = AnalysisRepository::new();
        let m1 = repo.find_or_create_molecule("CCO").await;
        let m2 = repo.find_or_create_molecule("CCN").await;
        repo.save_optimization(m1.id, sample_formulation(), ScoreTriple::fallback()).await;
        repo.save_optimization(m1.id, sample_formulation(), ScoreTriple::fallback()).await;
        repo.save_optimization(m2.id, sample_formulation(), ScoreTriple::fallback()).await;
        assert_eq!(repo.list_optimizations_for(m1.id).await.len(), 2);
        assert_eq!(repo.list_optimizations_for(m2.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_chat_history_preserves_order() {
        let repo = AnalysisRepository::new();
        repo.get_or_create_session("s1").await;
        repo.append_exchange("s1", "hola", "respuesta 1").await;
        repo.append_exchange("s1", "sigo", "respuesta 2").await;
        let history = repo.chat_history("s1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user, "hola");
        assert_eq!(history[1].assistant, "respuesta 2");
        assert!(repo.chat_history("desconocida").await.is_empty());
    }
}
