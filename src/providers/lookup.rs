//! Proveedor de datos moleculares externos.
//!
//! La consulta es best-effort: el pipeline la usa para enriquecer propiedades
//! estimadas, y un `None` o un error nunca interrumpe el análisis.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use nano_domain::ExternalRecord;

use crate::errors::ServiceError;

#[async_trait]
pub trait MolecularLookupProvider: Send + Sync {
    fn get_name(&self) -> &str;

    /// Busca el registro externo para un SMILES; `Ok(None)` si no hay match.
    async fn lookup(&self, smiles: &str) -> Result<Option<ExternalRecord>, ServiceError>;
}

fn record(name: &str, formula: &str, smiles: &str, drug_likeness: f64) -> ExternalRecord {
    ExternalRecord { name: Some(name.to_string()),
                     molecular_formula: Some(formula.to_string()),
                     canonical_smiles: Some(smiles.to_string()),
                     drug_likeness: Some(drug_likeness) }
}

/// Base local de compuestos de referencia; sustituye a la fuente remota en
/// entornos sin red y en tests.
static LOCAL_RECORDS: Lazy<HashMap<&'static str, ExternalRecord>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("CC(=O)OC1=CC=CC=C1C(=O)O",
             record("2-acetyloxybenzoic acid", "C9H8O4", "CC(=O)OC1=CC=CC=C1C(=O)O", 0.91));
    m.insert("CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",
             record("2-[4-(2-methylpropyl)phenyl]propanoic acid",
                    "C13H18O2",
                    "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",
                    0.93));
    m.insert("CC(=O)NC1=CC=C(O)C=C1",
             record("N-(4-hydroxyphenyl)acetamide", "C8H9NO2", "CC(=O)NC1=CC=C(O)C=C1", 0.89));
    m.insert("CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
             record("1,3,7-trimethylpurine-2,6-dione",
                    "C8H10N4O2",
                    "CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
                    0.62));
    m.insert("C1=CC(=C(C=C1CCN)O)O",
             record("4-(2-aminoethyl)benzene-1,2-diol",
                    "C8H11NO2",
                    "C1=CC(=C(C=C1CCN)O)O",
                    0.81));
    m
});

/// Proveedor local determinista sobre la base de compuestos de referencia.
#[derive(Debug, Default)]
pub struct LocalLookupProvider;

#[async_trait]
impl MolecularLookupProvider for LocalLookupProvider {
    fn get_name(&self) -> &str {
        "local_reference"
    }

    async fn lookup(&self, smiles: &str) -> Result<Option<ExternalRecord>, ServiceError> {
        Ok(LOCAL_RECORDS.get(smiles).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_molecule_has_record() {
        let provider = LocalLookupProvider;
        let rec = provider.lookup("CC(=O)OC1=CC=CC=C1C(=O)O").await.unwrap().unwrap();
        assert_eq!(rec.molecular_formula.as_deref(), Some("C9H8O4"));
        assert_eq!(rec.drug_likeness, Some(0.91));
    }

    #[tokio::test]
    async fn test_unknown_molecule_is_none() {
        let provider = LocalLookupProvider;
        assert!(provider.lookup("CCOC(=O)CCN").await.unwrap().is_none());
    }
}
