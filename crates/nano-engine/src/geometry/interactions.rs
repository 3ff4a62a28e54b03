//! Puntos de interacción fármaco-nanopartícula.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use super::{GeometryModel, InteractionPoint, NanoparticleModel};
use crate::hashing::stable_hash;

struct ElementPrefs {
    likelihood: f64,
    kinds: &'static [&'static str],
    color: &'static str,
    min_strength: f64,
}

/// Afinidad de interacción por elemento; el carbono es el caso por defecto.
fn element_prefs(element: &str) -> ElementPrefs {
    match element {
        "O" => ElementPrefs { likelihood: 0.7,
                              kinds: &["hydrogen_bond", "electrostatic"],
                              color: "#FF7F00",
                              min_strength: 0.6 },
        "N" => ElementPrefs { likelihood: 0.6,
                              kinds: &["hydrogen_bond", "electrostatic", "coordination"],
                              color: "#3333FF",
                              min_strength: 0.5 },
        "S" => ElementPrefs { likelihood: 0.5,
                              kinds: &["coordination", "hydrophobic"],
                              color: "#FFFF00",
                              min_strength: 0.4 },
        "Cl" => ElementPrefs { likelihood: 0.4,
                               kinds: &["halogen_bond", "hydrophobic"],
                               color: "#00FF00",
                               min_strength: 0.3 },
        "F" => ElementPrefs { likelihood: 0.3,
                              kinds: &["halogen_bond", "electrostatic"],
                              color: "#00FFFF",
                              min_strength: 0.2 },
        "Br" => ElementPrefs { likelihood: 0.5,
                               kinds: &["halogen_bond", "hydrophobic"],
                               color: "#800000",
                               min_strength: 0.4 },
        _ => ElementPrefs { likelihood: 0.2,
                            kinds: &["hydrophobic", "van_der_waals"],
                            color: "#CCCCCC",
                            min_strength: 0.1 },
    }
}

/// Factores por tipo de interacción según el coating; se multiplican cuando
/// el coating matchea varias claves.
const COATING_MODIFIERS: [(&str, [(&str, f64); 4]); 8] =
    [("PEG", [("electrostatic", 0.8), ("hydrogen_bond", 1.2), ("coordination", 0.5),
              ("hydrophobic", 0.3)]),
     ("PLGA", [("electrostatic", 1.0), ("hydrogen_bond", 1.0), ("coordination", 0.7),
               ("hydrophobic", 0.8)]),
     ("Chitosan", [("electrostatic", 1.3), ("hydrogen_bond", 1.1), ("coordination", 0.6),
                   ("hydrophobic", 0.4)]),
     ("Lipid", [("electrostatic", 0.7), ("hydrogen_bond", 0.8), ("coordination", 0.5),
                ("hydrophobic", 1.5)]),
     ("Gold", [("electrostatic", 0.6), ("hydrogen_bond", 0.4), ("coordination", 1.8),
               ("hydrophobic", 0.6)]),
     ("Silica", [("electrostatic", 1.2), ("hydrogen_bond", 1.0), ("coordination", 0.7),
                 ("hydrophobic", 0.5)]),
     ("Thiol", [("electrostatic", 0.8), ("hydrogen_bond", 0.6), ("coordination", 1.5),
                ("hydrophobic", 0.7)]),
     ("Phospholipid", [("electrostatic", 0.9), ("hydrogen_bond", 0.8), ("coordination", 0.5),
                       ("hydrophobic", 1.3)])];

/// {escala del punto de superficie, sufijo alfa del color} por tipo.
fn kind_visuals(kind: &str) -> (f64, &'static str) {
    match kind {
        "electrostatic" => (1.2, "CC"),
        "coordination" => (0.8, "88"),
        "hydrophobic" => (1.1, "99"),
        "van_der_waals" => (0.9, "77"),
        "halogen_bond" => (1.0, "BB"),
        _ => (1.0, "AA"), // hydrogen_bond
    }
}

/// Genera los puntos de interacción entre la molécula y la nanopartícula.
///
/// Cada átomo sortea su participación según la afinidad de su elemento; la
/// fuerza se modula por el coating y la carga superficial. Se conservan los
/// puntos más fuertes, entre 3 y 8 según el tamaño de la molécula. El RNG se
/// siembra con (nº de átomos, categoría, tamaño), así el par molécula +
/// formulación produce siempre los mismos puntos.
pub fn interaction_points(molecule: &GeometryModel, nanoparticle: &NanoparticleModel)
                          -> Vec<InteractionPoint> {
    if molecule.atoms.is_empty() {
        return Vec::new();
    }

    let modifiers = coating_modifier(nanoparticle);
    let limit = (molecule.atoms.len() / 3).clamp(3, 8);

    let seed_string = format!("{}_{}_{}",
                              molecule.atoms.len(),
                              nanoparticle.kind,
                              nanoparticle.size_nm);
    let mut rng = StdRng::seed_from_u64(stable_hash(&seed_string));

    struct Candidate {
        atom_index: usize,
        kind: &'static str,
        strength: f64,
        color: &'static str,
    }

    let mut candidates: Vec<Candidate> = Vec::new();
    for (i, atom) in molecule.atoms.iter().enumerate() {
        let prefs = element_prefs(&atom.element);
        if rng.gen::<f64>() < prefs.likelihood {
            let kind = prefs.kinds[rng.gen_range(0..prefs.kinds.len())];
            let base = prefs.min_strength + rng.gen::<f64>() * (1.0 - prefs.min_strength);
            let factor = modifiers.get(kind).copied().unwrap_or(1.0);
            candidates.push(Candidate { atom_index: i,
                                        kind,
                                        strength: (base * factor).min(1.0),
                                        color: prefs.color });
        }
    }

    candidates.sort_by(|a, b| {
                  b.strength
                   .partial_cmp(&a.strength)
                   .unwrap_or(std::cmp::Ordering::Equal)
              });
    candidates.truncate(limit);

    candidates.into_iter()
              .map(|c| {
                  let (scale, suffix) = kind_visuals(c.kind);
                  InteractionPoint { position: molecule.atoms[c.atom_index].position,
                                     surface_point: surface_point(c.atom_index,
                                                                  c.kind,
                                                                  nanoparticle.size_nm,
                                                                  scale),
                                     strength: c.strength,
                                     kind: c.kind.to_string(),
                                     atom_index: c.atom_index,
                                     color: format!("{}{}", c.color, suffix) }
              })
              .collect()
}

/// Punto pseudo-aleatorio determinístico sobre la esfera de la nanopartícula.
fn surface_point(atom_index: usize, kind: &str, size_nm: f64, scale: f64) -> [f64; 3] {
    let angle_seed = stable_hash(&format!("{atom_index}_{kind}"));
    let theta = (angle_seed % 1000) as f64 / 1000.0 * 2.0 * std::f64::consts::PI;
    let phi = (angle_seed % 500) as f64 / 500.0 * std::f64::consts::PI;
    let r = size_nm * 0.1;
    [r * phi.sin() * theta.cos() * 10.0 * scale,
     r * phi.sin() * theta.sin() * 10.0 * scale,
     r * phi.cos() * 10.0 * scale]
}

/// Combina los modificadores de todos los coatings que matchean; si ninguno
/// matchea, todos los factores quedan en 1.0. Cargas fuertes potencian el
/// componente electrostático.
fn coating_modifier(nanoparticle: &NanoparticleModel) -> HashMap<&'static str, f64> {
    let coating_lower = nanoparticle.coating.to_lowercase();
    let mut combined: HashMap<&'static str, f64> = HashMap::new();

    for (key, factors) in COATING_MODIFIERS {
        if coating_lower.contains(&key.to_lowercase()) {
            for (kind, factor) in factors {
                *combined.entry(kind).or_insert(1.0) *= factor;
            }
        }
    }

    if combined.is_empty() {
        for kind in ["electrostatic", "hydrogen_bond", "coordination", "hydrophobic",
                     "van_der_waals", "halogen_bond"]
        {
            combined.insert(kind, 1.0);
        }
    }

    let charge = nanoparticle.surface_charge_mv.abs();
    if charge > 20.0 {
        *combined.entry("electrostatic").or_insert(1.0) *= 1.5;
    } else if charge > 10.0 {
        *combined.entry("electrostatic").or_insert(1.0) *= 1.2;
    }

    combined
}
