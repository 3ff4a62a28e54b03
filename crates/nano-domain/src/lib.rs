//! nano-domain: tipos de valor inmutables del dominio nanofarmacéutico.
//!
//! Este crate define los registros que fluyen por el motor heurístico:
//! - `MoleculeIdentifier`: notación molecular validada sintácticamente.
//! - `PropertySet`: propiedades fisicoquímicas derivadas.
//! - `Formulation`: diseño de nanopartícula propuesto.
//! - `ScoreTriple`: puntajes de estabilidad / toxicidad / efectividad.
//!
//! Todos los tipos son valores inmutables tras su construcción; ninguno
//! mantiene referencias a estado mutable externo.

pub mod errors;
pub mod formulation;
pub mod molecule;
pub mod property_set;
pub mod scores;

pub use errors::DomainError;
pub use formulation::Formulation;
pub use molecule::{is_valid_smiles, MoleculeIdentifier};
pub use property_set::{ExternalRecord, PropertySet};
pub use scores::ScoreTriple;
