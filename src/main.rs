use serde_json::to_string_pretty;

use nanoflow_rust::pipeline::AnalysisPipeline;

/// Demo de uso del pipeline: análisis individual, lote, visualización y chat.
#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                             .init();

    let pipeline = AnalysisPipeline::with_defaults();

    // Análisis de moléculas de ejemplo usando SMILES
    let smiles_aspirin = "CC(=O)OC1=CC=CC=C1C(=O)O"; // Aspirina
    let smiles_ethanol = "CCO"; // Etanol

    let report = pipeline.analyze(smiles_aspirin).await.expect("análisis de aspirina");
    println!("Molécula: {}", report.smiles);
    println!("Propiedades: {}",
             to_string_pretty(&report.properties).unwrap_or_default());
    println!("Formulación: {}", report.formulation.summary);
    println!("Scores: estabilidad={} toxicidad={} efectividad={}",
             report.scores.stability_score,
             report.scores.toxicity_score,
             report.scores.effectiveness_score);

    // Determinismo: una segunda corrida produce exactamente lo mismo
    let report2 = pipeline.analyze(smiles_aspirin).await.expect("segunda corrida");
    println!("Determinismo: formulaciones iguales? {}",
             report.formulation == report2.formulation);

    // Visualización 3D de la optimización persistida
    let visualization = pipeline.visualize(report.optimization_id).await.expect("visualización");
    println!("Visualización: {} átomos, {} puntos de interacción ({})",
             visualization.molecule_atom_count,
             visualization.interaction_points_count,
             visualization.data_source);

    // Lote con un SMILES inválido en medio: el resto se procesa igual
    let batch = vec![smiles_ethanol.to_string(),
                     String::from("(not-balanced("),
                     String::from("CC(=O)NC1=CC=C(O)C=C1")];
    let results = pipeline.analyze_batch(&batch).await;
    for (smiles, result) in batch.iter().zip(&results) {
        match result {
            Some(r) => println!("[lote] {smiles}: {} / {:.2}",
                                r.formulation.nanoparticle_type, r.scores.effectiveness_score),
            None => println!("[lote] {smiles}: inválido"),
        }
    }

    // Chat con historial por sesión
    let reply = pipeline.chat("demo", "How should I optimize a nanoparticle?")
                        .await
                        .expect("chat");
    println!("Chat: {}", reply.response);
    let history = pipeline.chat_history("demo").await;
    println!("Historial de chat: {} intercambio(s)", history.len());
}
