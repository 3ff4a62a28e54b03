//! Construcción del modelo 3D esquemático de la molécula.

use nano_domain::MoleculeIdentifier;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use super::{Atom, Bond, GeometryModel};
use crate::hashing::stable_hash;

const MIN_ATOM_DISTANCE: f64 = 0.8;
const BOND_DISTANCE: f64 = 1.2;
const PLACEMENT_ATTEMPTS: usize = 100;

/// Color CPK aproximado por elemento.
fn element_color(element: &str) -> u32 {
    match element {
        "C" => 0x808080,
        "O" => 0xFF0000,
        "N" => 0x0000FF,
        "H" => 0xFFFFFF,
        "Cl" => 0x00FF00,
        "F" => 0x00FFFF,
        "Br" => 0x800000,
        "S" => 0xFFFF00,
        _ => 0xCCCCCC,
    }
}

fn element_radius(element: &str) -> f64 {
    match element {
        "C" => 0.4,
        "O" | "N" => 0.35,
        "H" => 0.25,
        "Cl" => 0.45,
        "F" => 0.3,
        "Br" => 0.5,
        "S" => 0.45,
        _ => 0.4,
    }
}

fn atom(element: &str, x: f64, y: f64, z: f64) -> Atom {
    Atom { element: element.to_string(),
           position: [x, y, z],
           color: element_color(element),
           radius: element_radius(element) }
}

fn bond(atom1: usize, atom2: usize, order: u8) -> Bond {
    Bond { atom1, atom2, order }
}

/// Estructuras curadas para las moléculas de referencia. El resto de las
/// moléculas recibe un layout sintético sembrado por hash.
static KNOWN_STRUCTURES: Lazy<HashMap<&'static str, GeometryModel>> = Lazy::new(|| {
    let mut m = HashMap::new();
    // Aspirina
    m.insert("CC(=O)OC1=CC=CC=C1C(=O)O",
             GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                         atom("C", 1.2, 0.0, 0.0),
                                         atom("O", 1.8, 1.1, 0.0),
                                         atom("O", 1.8, -1.1, 0.0),
                                         atom("C", -1.2, 0.0, 0.0),
                                         atom("C", -1.8, 1.2, 0.0),
                                         atom("C", -1.8, -1.2, 0.0),
                                         atom("C", -3.0, 1.2, 0.0),
                                         atom("C", -3.0, -1.2, 0.0),
                                         atom("C", -3.6, 0.0, 0.0),
                                         atom("O", 3.0, -1.2, 0.5),
                                         atom("C", 3.0, 0.0, 0.0),
                                         atom("O", 4.0, 0.5, 0.0)],
                             bonds: vec![bond(0, 1, 1),
                                         bond(1, 2, 2),
                                         bond(1, 3, 1),
                                         bond(0, 4, 1),
                                         bond(4, 5, 1),
                                         bond(4, 6, 1),
                                         bond(5, 7, 1),
                                         bond(6, 8, 1),
                                         bond(7, 9, 1),
                                         bond(8, 9, 1),
                                         bond(3, 10, 1),
                                         bond(10, 11, 1),
                                         bond(11, 12, 2)] });
    // Ibuprofeno
    m.insert("CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",
             GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                         atom("C", 1.2, 0.5, 0.0),
                                         atom("C", 1.2, 2.0, 0.0),
                                         atom("C", 2.4, -0.3, 0.0),
                                         atom("C", 3.7, 0.2, 0.0),
                                         atom("C", 4.2, 1.5, 0.0),
                                         atom("C", 5.6, 1.7, 0.0),
                                         atom("C", 6.4, 0.6, 0.0),
                                         atom("C", 5.9, -0.7, 0.0),
                                         atom("C", 4.5, -0.9, 0.0),
                                         atom("C", 7.9, 0.8, 0.0),
                                         atom("C", 8.5, 0.8, 1.4),
                                         atom("C", 8.7, -0.1, -0.9),
                                         atom("O", 10.0, 0.2, -0.9),
                                         atom("O", 8.3, -1.1, -1.5)],
                             bonds: vec![bond(0, 1, 1),
                                         bond(1, 2, 1),
                                         bond(1, 3, 1),
                                         bond(3, 4, 1),
                                         bond(4, 5, 2),
                                         bond(5, 6, 1),
                                         bond(6, 7, 2),
                                         bond(7, 8, 1),
                                         bond(8, 9, 2),
                                         bond(4, 9, 1),
                                         bond(7, 10, 1),
                                         bond(10, 11, 1),
                                         bond(10, 12, 1),
                                         bond(12, 13, 1),
                                         bond(12, 14, 2)] });
    // Paracetamol
    m.insert("CC(=O)NC1=CC=C(O)C=C1",
             GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                         atom("C", 1.4, 0.0, 0.0),
                                         atom("O", 2.0, 1.0, 0.0),
                                         atom("N", 2.0, -1.2, 0.0),
                                         atom("C", 3.4, -1.2, 0.0),
                                         atom("C", 4.1, -0.1, 0.5),
                                         atom("C", 5.5, -0.1, 0.5),
                                         atom("C", 6.2, -1.2, 0.0),
                                         atom("O", 7.6, -1.2, 0.0),
                                         atom("C", 5.5, -2.3, -0.5),
                                         atom("C", 4.1, -2.3, -0.5)],
                             bonds: vec![bond(0, 1, 1),
                                         bond(1, 2, 2),
                                         bond(1, 3, 1),
                                         bond(3, 4, 1),
                                         bond(4, 5, 2),
                                         bond(5, 6, 1),
                                         bond(6, 7, 2),
                                         bond(7, 8, 1),
                                         bond(7, 9, 1),
                                         bond(9, 10, 2),
                                         bond(10, 4, 1)] });
    // Cafeína
    m.insert("CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
             GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                         atom("N", 1.4, 0.0, 0.0),
                                         atom("C", 2.0, 1.2, 0.0),
                                         atom("N", 3.4, 1.2, 0.0),
                                         atom("C", 3.8, 0.0, 0.0),
                                         atom("C", 2.8, -1.0, 0.0),
                                         atom("C", 5.2, -0.2, 0.0),
                                         atom("O", 6.0, 0.7, 0.0),
                                         atom("N", 5.6, -1.5, 0.0),
                                         atom("C", 7.0, -1.8, 0.0),
                                         atom("C", 4.6, -2.5, 0.0),
                                         atom("O", 4.8, -3.7, 0.0),
                                         atom("N", 3.3, -2.0, 0.0),
                                         atom("C", 2.2, -2.9, 0.0)],
                             bonds: vec![bond(0, 1, 1),
                                         bond(1, 2, 1),
                                         bond(2, 3, 2),
                                         bond(3, 4, 1),
                                         bond(4, 5, 2),
                                         bond(5, 1, 1),
                                         bond(4, 6, 1),
                                         bond(6, 7, 2),
                                         bond(6, 8, 1),
                                         bond(8, 9, 1),
                                         bond(8, 10, 1),
                                         bond(10, 11, 2),
                                         bond(10, 12, 1),
                                         bond(12, 5, 1),
                                         bond(12, 13, 1)] });
    // Dopamina
    m.insert("C1=CC(=C(C=C1CCN)O)O",
             GeometryModel { atoms: vec![atom("C", 0.0, 0.0, 0.0),
                                         atom("C", 1.3, 0.4, 0.0),
                                         atom("C", 2.3, -0.6, 0.0),
                                         atom("C", 2.0, -2.0, 0.0),
                                         atom("C", 0.7, -2.4, 0.0),
                                         atom("C", -0.3, -1.4, 0.0),
                                         atom("C", 3.7, -0.2, 0.0),
                                         atom("C", 4.7, -1.3, 0.0),
                                         atom("N", 6.1, -0.9, 0.0),
                                         atom("O", 3.0, -2.9, 0.0),
                                         atom("O", 0.4, -3.7, 0.0)],
                             bonds: vec![bond(0, 1, 2),
                                         bond(1, 2, 1),
                                         bond(2, 3, 2),
                                         bond(3, 4, 1),
                                         bond(4, 5, 2),
                                         bond(5, 0, 1),
                                         bond(2, 6, 1),
                                         bond(6, 7, 1),
                                         bond(7, 8, 1),
                                         bond(3, 9, 1),
                                         bond(4, 10, 1)] });
    m
});

/// Devuelve el modelo 3D esquemático de la molécula.
///
/// Moléculas de referencia usan su estructura curada; para el resto se
/// sintetiza un layout esférico sembrado con el hash del SMILES, con
/// separación mínima entre átomos y enlaces inferidos por distancia.
pub fn molecule_model(id: &MoleculeIdentifier) -> GeometryModel {
    if let Some(model) = KNOWN_STRUCTURES.get(id.as_str()) {
        return model.clone();
    }
    synthesize(id)
}

fn synthesize(id: &MoleculeIdentifier) -> GeometryModel {
    let smiles = id.as_str();
    // Conteo de elementos en orden fijo; C descuenta las apariciones de Cl.
    let counts: [(&str, usize); 8] =
        [("C", id.count_char('C').saturating_sub(id.count_substr("Cl"))),
         ("O", id.count_char('O')),
         ("N", id.count_char('N')),
         ("H", (id.len() / 2).max(5)),
         ("Cl", id.count_substr("Cl")),
         ("F", id.count_char('F')),
         ("Br", id.count_substr("Br")),
         ("S", id.count_char('S'))];

    let mut rng = StdRng::seed_from_u64(stable_hash(smiles));
    let mut atoms: Vec<Atom> = Vec::new();

    for (element, count) in counts {
        for _ in 0..count {
            let position = place_atom(&mut rng, &atoms);
            atoms.push(Atom { element: element.to_string(),
                              position,
                              color: element_color(element),
                              radius: element_radius(element) });
        }
    }

    let mut bonds = Vec::new();
    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            if distance(atoms[i].position, atoms[j].position) < BOND_DISTANCE {
                bonds.push(Bond { atom1: i,
                                  atom2: j,
                                  order: bond_order(i, j, smiles) });
            }
        }
    }

    GeometryModel { atoms, bonds }
}

/// Sortea posiciones dentro de una esfera de radio 3 hasta respetar la
/// separación mínima; tras agotar los intentos acepta la última candidata
/// para garantizar terminación.
fn place_atom(rng: &mut StdRng, atoms: &[Atom]) -> [f64; 3] {
    let mut candidate = [0.0; 3];
    for _ in 0..PLACEMENT_ATTEMPTS {
        let theta = rng.gen::<f64>() * 2.0 * std::f64::consts::PI;
        let phi = rng.gen::<f64>() * std::f64::consts::PI;
        let r = rng.gen::<f64>() * 3.0;
        candidate = [round2(r * phi.sin() * theta.cos()),
                     round2(r * phi.sin() * theta.sin()),
                     round2(r * phi.cos())];
        if atoms.iter()
                .all(|a| distance(a.position, candidate) >= MIN_ATOM_DISTANCE)
        {
            return candidate;
        }
    }
    candidate
}

/// Orden de enlace determinístico por par de átomos: ~30% dobles, ~5% triples.
fn bond_order(i: usize, j: usize, smiles: &str) -> u8 {
    let seed = stable_hash(&format!("{i}_{j}_{smiles}"));
    if seed % 10 < 3 {
        2
    } else if seed % 100 < 5 {
        3
    } else {
        1
    }
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> MoleculeIdentifier {
        MoleculeIdentifier::parse(s).expect("valid SMILES")
    }

    #[test]
    fn test_known_structure_aspirin() {
        let model = molecule_model(&id("CC(=O)OC1=CC=CC=C1C(=O)O"));
        assert_eq!(model.atoms.len(), 13);
        assert_eq!(model.bonds.len(), 13);
        assert_eq!(model.atoms[2].element, "O");
        assert_eq!(model.atoms[2].color, 0xFF0000);
        assert_eq!(model.bonds[1].order, 2);
    }

    #[test]
    fn test_known_structure_caffeine() {
        let model = molecule_model(&id("CN1C=NC2=C1C(=O)N(C(=O)N2C)C"));
        assert_eq!(model.atoms.len(), 14);
        assert_eq!(model.bonds.len(), 15);
        let nitrogens = model.atoms.iter().filter(|a| a.element == "N").count();
        assert_eq!(nitrogens, 4);
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        let a = molecule_model(&id("CCOC(=O)CCN"));
        let b = molecule_model(&id("CCOC(=O)CCN"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_synthetic_element_counts() {
        // CCOC(=O)CCN: 5 C, 2 O, 1 N, max(5, 11/2)=5 H
        let model = molecule_model(&id("CCOC(=O)CCN"));
        let count = |e: &str| model.atoms.iter().filter(|a| a.element == e).count();
        assert_eq!(count("C"), 5);
        assert_eq!(count("O"), 2);
        assert_eq!(count("N"), 1);
        assert_eq!(count("H"), 5);
        assert_eq!(model.atoms.len(), 13);
    }

    #[test]
    fn test_chlorine_not_double_counted() {
        // ClCCl: 2 Cl, 0 C libres mas alla del esqueleto CCl-C... aqui
        // count('C') = 4 incluye los de "Cl", menos 2 => 2 C.
        let model = molecule_model(&id("ClCCCl"));
        let count = |e: &str| model.atoms.iter().filter(|a| a.element == e).count();
        assert_eq!(count("Cl"), 2);
        assert_eq!(count("C"), 2);
    }

    #[test]
    fn test_synthetic_minimum_separation_mostly_respected() {
        let model = molecule_model(&id("CCCCCCCC"));
        for atom in &model.atoms {
            for c in atom.position {
                assert!(c.abs() <= 3.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_bonds_reference_valid_atoms() {
        let model = molecule_model(&id("CCOC(=O)CCN"));
        for b in &model.bonds {
            assert!(b.atom1 < model.atoms.len());
            assert!(b.atom2 < model.atoms.len());
            assert!(b.atom1 < b.atom2);
            assert!(matches!(b.order, 1 | 2 | 3));
        }
    }
}
