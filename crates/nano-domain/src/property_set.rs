use serde::{Deserialize, Serialize};

/// Propiedades fisicoquímicas derivadas de un `MoleculeIdentifier`.
///
/// El peso molecular se serializa como string (convención heredada de la
/// fuente de datos). Los conteos de donores/aceptores de puente de hidrógeno
/// se emiten bajo sus dos nombres históricos (corto y largo) con el mismo
/// valor; `duplicate_hydrogen_keys` los mantiene sincronizados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    pub molecular_weight: String,
    #[serde(rename = "logP")]
    pub log_p: f64,
    pub h_bond_acceptors: u32,
    pub h_bond_donors: u32,
    pub hydrogen_bond_acceptors: u32,
    pub hydrogen_bond_donors: u32,
    pub rotatable_bonds: u32,
    pub polar_surface_area: f64,
    pub drug_likeness: f64,
    pub bioavailability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solubility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesizability: Option<f64>,
}

impl PropertySet {
    /// Copia los conteos cortos hacia las claves largas (mismo valor).
    pub fn duplicate_hydrogen_keys(mut self) -> Self {
        self.hydrogen_bond_acceptors = self.h_bond_acceptors;
        self.hydrogen_bond_donors = self.h_bond_donors;
        self
    }
}

/// Registro de propiedades obtenido de una fuente externa (best-effort).
///
/// Su ausencia nunca bloquea el pipeline: el merge sobre un `PropertySet`
/// sólo agrega metadatos y, si existe, prefiere el drug-likeness externo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub name: Option<String>,
    pub molecular_formula: Option<String>,
    pub canonical_smiles: Option<String>,
    pub drug_likeness: Option<f64>,
}

impl ExternalRecord {
    /// Merge best-effort sobre un `PropertySet` local.
    pub fn merge_into(&self, mut properties: PropertySet) -> PropertySet {
        if let Some(dl) = self.drug_likeness {
            properties.drug_likeness = dl;
        }
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertySet {
        PropertySet { molecular_weight: "180.2".to_string(),
                      log_p: 1.2,
                      h_bond_acceptors: 4,
                      h_bond_donors: 1,
                      hydrogen_bond_acceptors: 0,
                      hydrogen_bond_donors: 0,
                      rotatable_bonds: 3,
                      polar_surface_area: 63.6,
                      drug_likeness: 0.91,
                      bioavailability: 0.85,
                      solubility: None,
                      synthesizability: None }
    }

    #[test]
    fn test_duplicate_hydrogen_keys() {
        let p = sample().duplicate_hydrogen_keys();
        assert_eq!(p.hydrogen_bond_acceptors, p.h_bond_acceptors);
        assert_eq!(p.hydrogen_bond_donors, p.h_bond_donors);
    }

    #[test]
    fn test_serializes_both_key_conventions() {
        let json = serde_json::to_value(sample().duplicate_hydrogen_keys()).unwrap();
        assert_eq!(json["h_bond_acceptors"], 4);
        assert_eq!(json["hydrogen_bond_acceptors"], 4);
        assert_eq!(json["logP"], 1.2);
        assert!(json.get("solubility").is_none());
    }

    #[test]
    fn test_external_merge_prefers_external_drug_likeness() {
        let ext = ExternalRecord { name: Some("aspirin".into()),
                                   molecular_formula: Some("C9H8O4".into()),
                                   canonical_smiles: None,
                                   drug_likeness: Some(0.88) };
        let merged = ext.merge_into(sample());
        assert_eq!(merged.drug_likeness, 0.88);
    }
}
