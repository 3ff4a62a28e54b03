//! Flujo de integración completo: análisis -> persistencia -> visualización -> chat.

use std::sync::Arc;

use nano_engine::TtlCache;
use nanoflow_rust::database::AnalysisRepository;
use nanoflow_rust::pipeline::AnalysisPipeline;
use nanoflow_rust::providers::{KeywordChatResponder, LocalLookupProvider};

fn pipeline() -> AnalysisPipeline {
    AnalysisPipeline::new(AnalysisRepository::new(),
                          Arc::new(LocalLookupProvider),
                          Arc::new(KeywordChatResponder),
                          Arc::new(TtlCache::new()))
}

#[tokio::test]
async fn analyze_then_visualize_known_molecule() {
    let p = pipeline();
    let report = p.analyze("CC(=O)OC1=CC=CC=C1C(=O)O").await.expect("análisis ok");

    // Propiedades pre-sembradas de la aspirina, con solubilidad incluida
    assert_eq!(report.properties.molecular_weight, "180.2");
    assert_eq!(report.properties.solubility, Some(0.7));
    assert!(report.scores.in_bounds());

    // La formulación curada de la aspirina: liposoma con cubierta PEGilada
    assert_eq!(report.formulation.nanoparticle_type, "Liposome");
    assert_eq!(report.formulation.coating, "Phospholipid-PEG");

    let v = p.visualize(report.optimization_id).await.expect("visualización ok");
    assert_eq!(v.molecule_atom_count, 13);
    assert!(v.interaction_points_count >= 1);
    assert_eq!(v.nanoparticle_coating, report.formulation.coating);
    assert_eq!(v.data_source, "molecular_model");
}

#[tokio::test]
async fn analyze_novel_molecule_end_to_end() {
    let p = pipeline();
    let report = p.analyze("  CCOC(=O)CCN  ").await.expect("análisis ok");

    // El SMILES se normaliza antes de registrar
    assert_eq!(report.smiles, "CCOC(=O)CCN");
    assert!(report.properties.drug_likeness >= 0.1);
    assert!((70.0..=130.0).contains(&report.formulation.size_nm));

    let record = p.repository().get_optimization(report.optimization_id).await.unwrap();
    assert_eq!(record.formulation, report.formulation);

    let listed = p.repository().list_optimizations_for(report.molecule_id).await;
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn invalid_inputs_are_rejected_with_400() {
    let p = pipeline();
    for smiles in ["", "   ", "(not-balanced(", "C{C}O", "C<O>"] {
        let err = p.analyze(smiles).await.unwrap_err();
        assert_eq!(err.status_code(), 400, "debe rechazar {smiles:?}");
    }
}

#[tokio::test]
async fn batch_mixes_valid_and_invalid_items() {
    let p = pipeline();
    let items = vec![String::from("CC(C)CC1=CC=C(C=C1)C(C)C(=O)O"),
                     String::from("???"),
                     String::from("C1=CC(=C(C=C1CCN)O)O"),
                     String::new()];
    let reports = p.analyze_batch(&items).await;
    assert_eq!(reports.len(), 4);
    assert!(reports[0].is_some());
    assert!(reports[1].is_none());
    assert!(reports[2].is_some());
    assert!(reports[3].is_none());

    // Los válidos quedan persistidos
    let ibuprofen = reports[0].as_ref().unwrap();
    assert!(p.repository().get_optimization(ibuprofen.optimization_id).await.is_ok());
}

#[tokio::test]
async fn chat_session_accumulates_history() {
    let p = pipeline();
    let r1 = p.chat("session-a", "what molecular properties matter?").await.unwrap();
    let r2 = p.chat("session-a", "and what about toxicity?").await.unwrap();
    assert!(r1.response.contains("Molecular properties"));
    assert!(r2.response.contains("toxicity"));

    let history = p.chat_history("session-a").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].assistant, r1.response);
    assert_eq!(history[1].assistant, r2.response);

    // Sesiones separadas no comparten historial
    assert!(p.chat_history("session-b").await.is_empty());
}
