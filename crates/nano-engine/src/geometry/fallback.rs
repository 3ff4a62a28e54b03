//! Visualización de respaldo cuando el camino principal no puede completarse.

use nano_domain::{Formulation, MoleculeIdentifier};

use super::{Atom, Bond, GeometryModel, InteractionPoint, NanoparticleModel, Visualization};

fn atom(element: &str, x: f64, y: f64, z: f64) -> Atom {
    let (color, radius) = match element {
        "O" => (0xFF0000, 0.35),
        "N" => (0x0000FF, 0.35),
        _ => (0x808080, 0.4),
    };
    Atom { element: element.to_string(),
           position: [x, y, z],
           color,
           radius }
}

fn bond(atom1: usize, atom2: usize, order: u8) -> Bond {
    Bond { atom1, atom2, order }
}

/// Construye una visualización mínima pero contextual: la plantilla de
/// molécula se elige mirando los rasgos gruesos del SMILES y la nanopartícula
/// hereda lo que se pueda de la formulación. Nunca falla.
pub fn fallback_visualization(id: Option<&MoleculeIdentifier>,
                              formulation: Option<&Formulation>)
                              -> Visualization {
    let molecule = fallback_molecule(id);
    let nanoparticle = fallback_nanoparticle(formulation);
    let interactions = fallback_interactions(&molecule);
    super::assemble(molecule, nanoparticle, interactions, "fallback_model")
}

fn fallback_molecule(id: Option<&MoleculeIdentifier>) -> GeometryModel {
    let Some(id) = id else {
        // Sin molécula: esqueleto genérico con un O y un N
        return GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                           atom("O", 1.0, 0.0, 0.0),
                                           atom("N", 0.0, 1.0, 0.0),
                                           atom("C", -1.0, 0.0, 0.0),
                                           atom("C", 0.0, -1.0, 0.0)],
                               bonds: vec![bond(0, 1, 1),
                                           bond(0, 2, 1),
                                           bond(0, 3, 1),
                                           bond(0, 4, 1)] };
    };

    let smiles = id.as_str();
    if smiles.contains('O') && smiles.contains('N') {
        // Compuesto tipo fármaco con O y N
        GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                    atom("C", 1.0, 0.0, 0.0),
                                    atom("O", 1.5, 1.0, 0.0),
                                    atom("N", 2.0, 0.0, 0.0),
                                    atom("C", -1.0, 0.0, 0.0),
                                    atom("C", -1.5, 1.0, 0.0),
                                    atom("C", -1.5, -1.0, 0.0)],
                        bonds: vec![bond(0, 1, 1),
                                    bond(1, 2, 2),
                                    bond(1, 3, 1),
                                    bond(0, 4, 1),
                                    bond(4, 5, 1),
                                    bond(4, 6, 1)] }
    } else if smiles.contains('C') && smiles.len() > 20 {
        // Molécula grande rica en carbono: anillo con cadena lateral
        GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                    atom("C", 1.0, 0.5, 0.0),
                                    atom("C", 2.0, 0.0, 0.0),
                                    atom("C", 2.0, -1.0, 0.0),
                                    atom("C", 1.0, -1.5, 0.0),
                                    atom("C", 0.0, -1.0, 0.0),
                                    atom("C", 3.0, 0.5, 0.0),
                                    atom("C", 3.0, 1.5, 0.0),
                                    atom("O", 4.0, 2.0, 0.0)],
                        bonds: vec![bond(0, 1, 1),
                                    bond(1, 2, 2),
                                    bond(2, 3, 1),
                                    bond(3, 4, 2),
                                    bond(4, 5, 1),
                                    bond(5, 0, 2),
                                    bond(2, 6, 1),
                                    bond(6, 7, 1),
                                    bond(7, 8, 2)] }
    } else {
        // Molécula simple
        GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                    atom("O", 1.0, 0.0, 0.0),
                                    atom("C", -1.0, 0.0, 0.0),
                                    atom("C", 0.0, 1.0, 0.0)],
                        bonds: vec![bond(0, 1, 2), bond(0, 2, 1), bond(0, 3, 1)] }
    }
}

fn fallback_nanoparticle(formulation: Option<&Formulation>) -> NanoparticleModel {
    let Some(f) = formulation else {
        return NanoparticleModel { kind: String::from("polymeric"),
                                   size_nm: 100.0,
                                   color: 0x0000FF,
                                   surface_charge_mv: -10.0,
                                   coating: String::from("PEG-PLGA"),
                                   shape: String::from("sphere"),
                                   texture: String::from("smooth"),
                                   surface_density: String::from("medium") };
    };

    let kind = f.nanoparticle_type.to_lowercase();
    let color = if kind.contains("gold") {
        0xFFD700
    } else if kind.contains("lipid") || kind.contains("liposome") {
        0xFFFF00
    } else if kind.contains("silica") {
        0xF5F5F5
    } else if kind.contains("dendrimer") {
        0xBA55D3
    } else {
        0x0000FF
    };

    let size_nm = if f.size_nm.is_finite() { f.size_nm } else { 100.0 };
    let charge = if f.surface_charge_mv.is_finite() { f.surface_charge_mv } else { -10.0 };

    NanoparticleModel { kind,
                        size_nm,
                        color,
                        surface_charge_mv: charge,
                        coating: f.coating.clone(),
                        shape: String::from("sphere"),
                        texture: String::from("smooth"),
                        surface_density: String::from("medium") }
}

/// Dos puntos de interacción: uno preferentemente sobre un O, otro sobre un N,
/// con degradación al primer o segundo átomo disponible.
fn fallback_interactions(molecule: &GeometryModel) -> Vec<InteractionPoint> {
    let mut points = Vec::new();
    if molecule.atoms.is_empty() {
        return points;
    }

    let find = |element: &str| molecule.atoms.iter().position(|a| a.element == element);

    match find("O") {
        Some(i) => points.push(InteractionPoint { position: molecule.atoms[i].position,
                                                  surface_point: [5.0, 5.0, 0.0],
                                                  strength: 0.8,
                                                  kind: String::from("hydrogen_bond"),
                                                  atom_index: i,
                                                  color: String::from("#FF7F00AA") }),
        None => points.push(InteractionPoint { position: molecule.atoms[0].position,
                                               surface_point: [5.0, 5.0, 0.0],
                                               strength: 0.7,
                                               kind: String::from("hydrophobic"),
                                               atom_index: 0,
                                               color: String::from("#CCCCCC99") }),
    }

    if let Some(i) = find("N") {
        points.push(InteractionPoint { position: molecule.atoms[i].position,
                                       surface_point: [0.0, 5.0, 5.0],
                                       strength: 0.7,
                                       kind: String::from("electrostatic"),
                                       atom_index: i,
                                       color: String::from("#3333FFCC") });
    } else if molecule.atoms.len() > 1 {
        points.push(InteractionPoint { position: molecule.atoms[1].position,
                                       surface_point: [0.0, 5.0, 5.0],
                                       strength: 0.6,
                                       kind: String::from("van_der_waals"),
                                       atom_index: 1,
                                       color: String::from("#CCCCCC77") });
    }

    points
}
