//! Orquestador principal del análisis.
//! Se encarga de:
//! - Validar el SMILES de entrada y normalizarlo.
//! - Estimar propiedades (con pre-siembra para compuestos frecuentes) y
//!   enriquecerlas con la fuente externa cuando responde.
//! - Generar la formulación, puntuarla y persistir la optimización.
//! - Servir visualizaciones 3D por optimización, con degradación a fallback.
//! - Atender el chat con historial por sesión.
//! Cada etapa cacheable pasa por la `TtlCache` con el TTL configurado.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use nano_domain::{Formulation, MoleculeIdentifier, PropertySet, ScoreTriple};
use nano_engine::{build_visualization, estimate_properties, fallback_visualization,
                  generate_formulation, process_batch, score_formulation, spawn_sweeper,
                  EngineError, TtlCache, Visualization};

use crate::config::CONFIG;
use crate::database::{AnalysisRepository, ChatExchange, OptimizationRecord};
use crate::errors::ServiceError;
use crate::providers::chat::APOLOGY;
use crate::providers::{ChatResponder, KeywordChatResponder, LocalLookupProvider,
                       MolecularLookupProvider};

const PACLITAXEL: &str = "CC1=C2[C@@]([C@]([C@H]([C@@H]3[C@]4([C@H](OC4)C[C@@H]([C@]3(C(=O)[C@@H]2OC(=O)C)C)O)OC(=O)C)OC(=O)c5ccccc5)(C[C@@H]1OC(=O)C)O)(C)CC=O";

fn seeded(mw: &str, logp: f64, acceptors: u32, donors: u32, rotatable: u32, psa: f64, dl: f64,
          bio: f64, solubility: f64, synthesizability: f64)
          -> PropertySet {
    PropertySet { molecular_weight: mw.to_string(),
                  log_p: logp,
                  h_bond_acceptors: acceptors,
                  h_bond_donors: donors,
                  hydrogen_bond_acceptors: acceptors,
                  hydrogen_bond_donors: donors,
                  rotatable_bonds: rotatable,
                  polar_surface_area: psa,
                  drug_likeness: dl,
                  bioavailability: bio,
                  solubility: Some(solubility),
                  synthesizability: Some(synthesizability) }
}

/// Propiedades pre-sembradas para compuestos consultados con frecuencia; a
/// diferencia de las tablas del estimador incluyen solubilidad y
/// sintetizabilidad.
static COMMON_PROPERTIES: Lazy<HashMap<&'static str, PropertySet>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("CC(=O)OC1=CC=CC=C1C(=O)O",
             seeded("180.2", 1.2, 4, 1, 3, 63.6, 0.91, 0.85, 0.7, 0.95));
    m.insert("CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",
             seeded("206.3", 3.5, 2, 1, 4, 37.3, 0.93, 0.92, 0.6, 0.9));
    m.insert(PACLITAXEL,
             seeded("853.9", 3.7, 14, 4, 12, 221.3, 0.48, 0.35, 0.2, 0.12));
    m
});

/// Resultado completo de un análisis persistido.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub molecule_id: Uuid,
    pub optimization_id: Uuid,
    pub smiles: String,
    pub properties: PropertySet,
    pub formulation: Formulation,
    pub scores: ScoreTriple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub session_id: String,
    pub response: String,
}

pub struct AnalysisPipeline {
    repository: AnalysisRepository,
    lookup: Arc<dyn MolecularLookupProvider>,
    chat: Arc<dyn ChatResponder>,
    cache: Arc<TtlCache>,
}

impl AnalysisPipeline {
    pub fn new(repository: AnalysisRepository, lookup: Arc<dyn MolecularLookupProvider>,
               chat: Arc<dyn ChatResponder>, cache: Arc<TtlCache>)
               -> Self {
        Self { repository,
               lookup,
               chat,
               cache }
    }

    /// Pipeline con colaboradores locales, límites de caché tomados de la
    /// configuración y barrido periódico en segundo plano.
    pub fn with_defaults() -> Self {
        let cache = Arc::new(TtlCache::with_limits(Arc::new(nano_engine::SystemClock),
                                                   CONFIG.cache.capacity,
                                                   CONFIG.cache.max_age_secs));
        spawn_sweeper(cache.clone(),
                      Duration::from_secs(CONFIG.cache.sweep_interval_secs));
        Self::new(AnalysisRepository::new(),
                  Arc::new(LocalLookupProvider),
                  Arc::new(KeywordChatResponder),
                  cache)
    }

    pub fn repository(&self) -> &AnalysisRepository {
        &self.repository
    }

    /// Análisis completo de una molécula: propiedades, formulación, scores y
    /// persistencia de la optimización resultante.
    pub async fn analyze(&self, smiles: &str) -> Result<AnalysisReport, ServiceError> {
        let id = MoleculeIdentifier::parse(smiles)?;
        tracing::info!(smiles = %id, "analizando molécula");

        let mut properties = self.cached_properties(&id)?;
        self.enrich_from_lookup(&id, &mut properties).await;

        let formulation = self.cached_formulation(&id)?;
        let scores = score_formulation(&formulation);

        let molecule = self.repository.find_or_create_molecule(id.as_str()).await;
        let optimization = self.repository
                               .save_optimization(molecule.id, formulation.clone(), scores.clone())
                               .await;

        Ok(AnalysisReport { molecule_id: molecule.id,
                            optimization_id: optimization.id,
                            smiles: id.as_str().to_string(),
                            properties,
                            formulation,
                            scores })
    }

    /// Analiza un lote conservando el orden; los ítems inválidos quedan como
    /// `None` sin interrumpir el resto.
    pub async fn analyze_batch(&self, items: &[String]) -> Vec<Option<AnalysisReport>> {
        let computed = process_batch(items, CONFIG.batch.size, |smiles| {
            let id = MoleculeIdentifier::parse(smiles).map_err(|e| {
                                                          EngineError::Internal(e.to_string())
                                                      })?;
            let properties = self.cached_properties(&id)?;
            let formulation = self.cached_formulation(&id)?;
            let scores = score_formulation(&formulation);
            Ok((id, properties, formulation, scores))
        });

        let mut reports = Vec::with_capacity(computed.len());
        for item in computed {
            match item {
                Some((id, properties, formulation, scores)) => {
                    let molecule = self.repository.find_or_create_molecule(id.as_str()).await;
                    let optimization = self.repository
                                           .save_optimization(molecule.id,
                                                              formulation.clone(),
                                                              scores.clone())
                                           .await;
                    reports.push(Some(AnalysisReport { molecule_id: molecule.id,
                                                       optimization_id: optimization.id,
                                                       smiles: id.as_str().to_string(),
                                                       properties,
                                                       formulation,
                                                       scores }));
                }
                None => reports.push(None),
            }
        }
        reports
    }

    /// Visualización 3D de una optimización persistida.
    pub async fn visualize(&self, optimization_id: Uuid) -> Result<Visualization, ServiceError> {
        let record = self.repository.get_optimization(optimization_id).await?;
        let molecule = self.repository.get_molecule(record.molecule_id).await?;
        let args = optimization_id.to_string();

        let visualization =
            self.cache
                .get_or_compute("visualization", &args, CONFIG.cache.visualize_ttl_secs, || {
                    Ok(render_visualization(&molecule.smiles, &record))
                })?;
        Ok(visualization)
    }

    /// Atiende un mensaje de chat: responde, registra el intercambio y
    /// devuelve la respuesta con su sesión.
    pub async fn chat(&self, session_id: &str, message: &str) -> Result<ChatReply, ServiceError> {
        if message.trim().is_empty() {
            return Err(ServiceError::InvalidInput(String::from("mensaje vacío")));
        }
        if session_id.trim().is_empty() {
            return Err(ServiceError::InvalidInput(String::from("sesión vacía")));
        }

        self.repository.get_or_create_session(session_id).await;
        let history = self.repository.chat_history(session_id).await;
        let response = match self.chat.respond(message, &history).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "respondedor de chat falló");
                APOLOGY.to_string()
            }
        };
        self.repository.append_exchange(session_id, message, &response).await;
        Ok(ChatReply { session_id: session_id.to_string(),
                       response })
    }

    pub async fn chat_history(&self, session_id: &str) -> Vec<ChatExchange> {
        self.repository.chat_history(session_id).await
    }

    fn cached_properties(&self, id: &MoleculeIdentifier) -> Result<PropertySet, EngineError> {
        self.cache
            .get_or_compute("properties", id.as_str(), CONFIG.cache.predict_ttl_secs, || {
                if let Some(seeded) = COMMON_PROPERTIES.get(id.as_str()) {
                    tracing::debug!(smiles = %id, "propiedades pre-sembradas");
                    return Ok(seeded.clone());
                }
                Ok(estimate_properties(id))
            })
    }

    fn cached_formulation(&self, id: &MoleculeIdentifier) -> Result<Formulation, EngineError> {
        self.cache
            .get_or_compute("formulation", id.as_str(), CONFIG.cache.predict_ttl_secs, || {
                Ok(generate_formulation(id))
            })
    }

    /// Enriquecimiento best-effort desde la fuente externa; cachea también los
    /// misses para no repetir consultas.
    async fn enrich_from_lookup(&self, id: &MoleculeIdentifier, properties: &mut PropertySet) {
        let ttl = CONFIG.cache.lookup_ttl_secs;
        let cached = match self.cache.get("lookup", id.as_str(), ttl) {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(error = %e, "lectura de caché de lookup falló");
                None
            }
        };

        let record = match cached {
            Some(record) => record,
            None => {
                let fetched = match self.lookup.lookup(id.as_str()).await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!(error = %e, smiles = %id, "lookup externo falló");
                        return;
                    }
                };
                if let Err(e) = self.cache.insert("lookup", id.as_str(), &fetched) {
                    tracing::warn!(error = %e, "no se pudo cachear el lookup");
                }
                fetched
            }
        };

        if let Some(record) = record {
            *properties = record.merge_into(properties.clone());
        }
    }
}

fn render_visualization(smiles: &str, record: &OptimizationRecord) -> Visualization {
    match MoleculeIdentifier::parse(smiles) {
        Ok(id) => build_visualization(&id, &record.formulation),
        Err(e) => {
            tracing::warn!(error = %e, "SMILES persistido inválido; fallback");
            fallback_visualization(None, Some(&record.formulation))
        }
    }
}
