//! Sintetizador de geometría 3D e interacciones fármaco-nanopartícula.
//!
//! Produce layouts esquemáticos aptos para un visor 3D: átomos y enlaces de
//! la molécula (lookup exacto o construcción sintética sembrada por hash),
//! representación de la nanopartícula derivada del coating, y puntos de
//! interacción pseudo-físicos entre ambos. Todo sorteo usa un RNG sembrado
//! determinísticamente: mismos insumos, misma visualización.

mod fallback;
mod interactions;
mod molecule_model;
mod nanoparticle;

pub use fallback::fallback_visualization;
pub use interactions::interaction_points;
pub use molecule_model::molecule_model;
pub use nanoparticle::nanoparticle_model;

use nano_domain::{Formulation, MoleculeIdentifier};
use serde::{Deserialize, Serialize};

/// Átomo con posición y atributos de despliegue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    pub position: [f64; 3],
    pub color: u32,
    pub radius: f64,
}

/// Enlace entre dos índices de átomo, orden 1/2/3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryModel {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

/// Representación de la nanopartícula derivada de la formulación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NanoparticleModel {
    #[serde(rename = "type")]
    pub kind: String,
    pub size_nm: f64,
    pub color: u32,
    pub surface_charge_mv: f64,
    pub coating: String,
    pub shape: String,
    pub texture: String,
    pub surface_density: String,
}

/// Punto de interacción entre un átomo y la superficie de la nanopartícula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPoint {
    pub position: [f64; 3],
    pub surface_point: [f64; 3],
    pub strength: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub atom_index: usize,
    pub color: String,
}

/// Paquete completo de visualización con metadatos para el cliente 3D.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    pub molecule: GeometryModel,
    pub nanoparticle: NanoparticleModel,
    pub interactions: Vec<InteractionPoint>,
    pub molecule_atom_count: usize,
    pub nanoparticle_size_nm: f64,
    pub nanoparticle_charge_mv: f64,
    pub nanoparticle_coating: String,
    pub nanoparticle_shape: String,
    pub nanoparticle_texture: String,
    pub nanoparticle_surface_density: String,
    pub interaction_points_count: usize,
    pub data_source: String,
}

/// Arma la visualización completa para una molécula y su formulación.
///
/// Si la formulación llegó corrupta (campos no numéricos tras un round-trip
/// de almacenamiento) se degrada al camino de fallback contextual: el
/// resultado sigue siendo una visualización mínima válida, nunca un error.
pub fn build_visualization(id: &MoleculeIdentifier, formulation: &Formulation) -> Visualization {
    if !formulation.size_nm.is_finite() || !formulation.surface_charge_mv.is_finite() {
        tracing::warn!(smiles = %id, "formulación no numérica; usando visualización de fallback");
        return fallback_visualization(Some(id), Some(formulation));
    }

    let molecule = molecule_model(id);
    let nanoparticle = nanoparticle_model(formulation);
    let interactions = interaction_points(&molecule, &nanoparticle);
    assemble(molecule, nanoparticle, interactions, "molecular_model")
}

pub(crate) fn assemble(molecule: GeometryModel, nanoparticle: NanoparticleModel,
                       interactions: Vec<InteractionPoint>, data_source: &str)
                       -> Visualization {
    Visualization { molecule_atom_count: molecule.atoms.len(),
                    nanoparticle_size_nm: nanoparticle.size_nm,
                    nanoparticle_charge_mv: nanoparticle.surface_charge_mv,
                    nanoparticle_coating: nanoparticle.coating.clone(),
                    nanoparticle_shape: nanoparticle.shape.clone(),
                    nanoparticle_texture: nanoparticle.texture.clone(),
                    nanoparticle_surface_density: nanoparticle.surface_density.clone(),
                    interaction_points_count: interactions.len(),
                    data_source: data_source.to_string(),
                    molecule,
                    nanoparticle,
                    interactions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_formulation;

    fn id(s: &str) -> MoleculeIdentifier {
        MoleculeIdentifier::parse(s).expect("valid SMILES")
    }

    #[test]
    fn test_build_visualization_is_deterministic() {
        let m = id("CCOC(=O)CCN");
        let f = generate_formulation(&m);
        let a = build_visualization(&m, &f);
        let b = build_visualization(&m, &f);
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_visualization_metadata_counts() {
        let m = id("CC(=O)OC1=CC=CC=C1C(=O)O");
        let f = generate_formulation(&m);
        let v = build_visualization(&m, &f);
        assert_eq!(v.molecule_atom_count, v.molecule.atoms.len());
        assert_eq!(v.interaction_points_count, v.interactions.len());
        assert_eq!(v.data_source, "molecular_model");
    }

    #[test]
    fn test_corrupt_formulation_degrades_to_fallback() {
        let m = id("CCOC(=O)CCN");
        let mut f = generate_formulation(&m);
        f.size_nm = f64::NAN;
        let v = build_visualization(&m, &f);
        assert_eq!(v.data_source, "fallback_model");
        assert!(!v.molecule.atoms.is_empty());
        assert!(!v.interactions.is_empty());
    }
}
