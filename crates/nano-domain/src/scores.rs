use serde::{Deserialize, Serialize};

/// Puntajes normalizados de una formulación, cada uno acotado a [0.1, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub stability_score: f64,
    pub toxicity_score: f64,
    pub effectiveness_score: f64,
}

impl ScoreTriple {
    /// Valores por defecto usados cuando el cálculo falla.
    pub fn fallback() -> Self {
        Self { stability_score: 0.7,
               toxicity_score: 0.5,
               effectiveness_score: 0.7 }
    }

    /// Verdadero si los tres puntajes están dentro de [0.1, 1.0].
    pub fn in_bounds(&self) -> bool {
        [self.stability_score, self.toxicity_score, self.effectiveness_score].iter()
                                                                             .all(|s| (0.1..=1.0).contains(s))
    }
}
