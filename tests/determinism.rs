//! Determinismo de extremo a extremo: mismas entradas, mismos resultados,
//! incluso a través de pipelines independientes.

use std::sync::Arc;

use nano_domain::MoleculeIdentifier;
use nano_engine::{estimate_properties, generate_formulation, molecule_model, score_formulation,
                  TtlCache};
use nanoflow_rust::database::AnalysisRepository;
use nanoflow_rust::pipeline::AnalysisPipeline;
use nanoflow_rust::providers::{KeywordChatResponder, LocalLookupProvider};

fn pipeline() -> AnalysisPipeline {
    AnalysisPipeline::new(AnalysisRepository::new(),
                          Arc::new(LocalLookupProvider),
                          Arc::new(KeywordChatResponder),
                          Arc::new(TtlCache::new()))
}

const NOVEL_SMILES: &[&str] = &["CCOC(=O)CCN", "C1CCCCC1O", "CC(Cl)CBr", "NCCSP"];

#[tokio::test]
async fn independent_pipelines_agree() {
    let a = pipeline();
    let b = pipeline();
    for smiles in NOVEL_SMILES {
        let ra = a.analyze(smiles).await.expect("pipeline a");
        let rb = b.analyze(smiles).await.expect("pipeline b");
        assert_eq!(ra.properties, rb.properties, "propiedades difieren para {smiles}");
        assert_eq!(ra.formulation, rb.formulation, "formulación difiere para {smiles}");
        assert_eq!(ra.scores, rb.scores, "scores difieren para {smiles}");
    }
}

#[tokio::test]
async fn repeated_analysis_is_stable_within_a_pipeline() {
    let p = pipeline();
    let first = p.analyze("CC(Cl)CBr").await.unwrap();
    for _ in 0..3 {
        let again = p.analyze("CC(Cl)CBr").await.unwrap();
        assert_eq!(first.formulation, again.formulation);
        assert_eq!(first.properties, again.properties);
    }
}

#[test]
fn engine_primitives_are_pure() {
    for smiles in NOVEL_SMILES {
        let id = MoleculeIdentifier::parse(smiles).unwrap();
        assert_eq!(estimate_properties(&id), estimate_properties(&id));
        let f = generate_formulation(&id);
        assert_eq!(f, generate_formulation(&id));
        assert_eq!(score_formulation(&f), score_formulation(&f));
        assert_eq!(molecule_model(&id), molecule_model(&id));
    }
}

#[tokio::test]
async fn visualization_is_stable_for_same_optimization() {
    let p = pipeline();
    let report = p.analyze("CCOC(=O)CCN").await.unwrap();
    let v1 = p.visualize(report.optimization_id).await.unwrap();
    let v2 = p.visualize(report.optimization_id).await.unwrap();
    assert_eq!(v1, v2);
}
