use serde::{Deserialize, Serialize};

/// Diseño de nanopartícula propuesto para un fármaco.
///
/// Derivado determinísticamente de un `MoleculeIdentifier`; los campos de
/// rationale y el resumen son metadatos descriptivos, nunca insumo de otros
/// cálculos. Inmutable una vez generado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formulation {
    pub nanoparticle_type: String,
    pub coating: String,
    pub size_nm: f64,
    pub surface_charge_mv: f64,
    pub loading_method: String,
    pub type_rationale: String,
    pub coating_rationale: String,
    pub size_rationale: String,
    pub charge_rationale: String,
    pub loading_rationale: String,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_json() {
        let f = Formulation { nanoparticle_type: "Liposome".into(),
                              coating: "Phospholipid-PEG".into(),
                              size_nm: 85.0,
                              surface_charge_mv: -22.0,
                              loading_method: "Passive Encapsulation".into(),
                              type_rationale: "t".into(),
                              coating_rationale: "c".into(),
                              size_rationale: "s".into(),
                              charge_rationale: "q".into(),
                              loading_rationale: "l".into(),
                              summary: "sum".into() };
        let json = serde_json::to_string(&f).unwrap();
        let back: Formulation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
