//! Clasificador de estabilidad, toxicidad y efectividad.
//!
//! Función pura de los campos numéricos/categóricos de la formulación: cada
//! puntaje es el promedio de tres componentes en [0,1], recortado a
//! [0.1, 1.0]. Ante entradas no numéricas (NaN/infinito) responde con los
//! valores por defecto en vez de fallar.

use nano_domain::{Formulation, ScoreTriple};

const COATING_STABILITY: [(&str, f64); 7] = [("peg", 0.9),
                                             ("plga", 0.85),
                                             ("chitosan", 0.7),
                                             ("lipid", 0.75),
                                             ("albumin", 0.8),
                                             ("silica", 0.9),
                                             ("gold", 0.95)];

const COATING_TOXICITY: [(&str, f64); 7] = [("peg", 0.3),
                                            ("plga", 0.4),
                                            ("chitosan", 0.5),
                                            ("lipid", 0.4),
                                            ("albumin", 0.3),
                                            ("silica", 0.6),
                                            ("gold", 0.7)];

const COATING_EFFECTIVENESS: [(&str, f64); 7] = [("peg", 0.8),
                                                 ("plga", 0.85),
                                                 ("chitosan", 0.7),
                                                 ("lipid", 0.9),
                                                 ("albumin", 0.75),
                                                 ("silica", 0.6),
                                                 ("gold", 0.7)];

/// Métodos de carga considerados buen match por keyword de coating.
const GOOD_MATCHES: [(&str, [&str; 2]); 7] = [("peg", ["conjugation", "encapsulation"]),
                                              ("plga", ["encapsulation", "adsorption"]),
                                              ("lipid", ["encapsulation", "intercalation"]),
                                              ("chitosan", ["adsorption", "electrostatic"]),
                                              ("albumin", ["conjugation", "adsorption"]),
                                              ("silica", ["adsorption", "pore loading"]),
                                              ("gold", ["conjugation", "surface attachment"])];

/// Puntúa una formulación. Determinista y acotada a [0.1, 1.0].
pub fn score_formulation(formulation: &Formulation) -> ScoreTriple {
    let size_nm = formulation.size_nm;
    let charge_mv = formulation.surface_charge_mv;
    if !size_nm.is_finite() || !charge_mv.is_finite() {
        return ScoreTriple::fallback();
    }

    let coating = formulation.coating.to_lowercase();
    let loading_method = formulation.loading_method.to_lowercase();

    // Estabilidad: ajuste de tamaño (óptimo ~100 nm), magnitud de carga y coating.
    let size_factor = 1.0 - ((size_nm - 100.0).abs() / 100.0).min(0.5);
    let charge_factor = (charge_mv.abs() / 30.0).min(1.0);
    let coating_factor = keyword_lookup(&coating, &COATING_STABILITY, 0.6);
    let stability = clamp_score((size_factor + charge_factor + coating_factor) / 3.0);

    // Toxicidad: partículas chicas y cargas altas suben; ciertos coatings bajan.
    let size_toxicity = 1.0 - size_nm.min(200.0) / 200.0;
    let charge_toxicity = (charge_mv.abs() / 50.0).min(1.0);
    let coating_toxicity = keyword_lookup(&coating, &COATING_TOXICITY, 0.7);
    let toxicity = clamp_score((size_toxicity + charge_toxicity + coating_toxicity) / 3.0);

    // Efectividad: bucket de tamaño, coating y compatibilidad con el método de carga.
    let size_effectiveness = if (50.0..=150.0).contains(&size_nm) {
        0.8
    } else if size_nm < 50.0 {
        0.6
    } else {
        0.5
    };
    let coating_effectiveness = keyword_lookup(&coating, &COATING_EFFECTIVENESS, 0.6);
    let match_factor = if loading_matches_coating(&coating, &loading_method) { 0.9 } else { 0.5 };
    let effectiveness = clamp_score((size_effectiveness + coating_effectiveness + match_factor) / 3.0);

    ScoreTriple { stability_score: stability,
                  toxicity_score: toxicity,
                  effectiveness_score: effectiveness }
}

/// Primera keyword contenida en el coating gana; default si ninguna aplica.
fn keyword_lookup(coating: &str, table: &[(&str, f64)], default: f64) -> f64 {
    table.iter()
         .find(|(key, _)| coating.contains(key))
         .map(|(_, value)| *value)
         .unwrap_or(default)
}

fn loading_matches_coating(coating: &str, loading_method: &str) -> bool {
    GOOD_MATCHES.iter()
                .any(|(key, methods)| coating.contains(key) && methods.iter().any(|m| loading_method.contains(m)))
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.1, 1.0)
}
