//! Representación visual de la nanopartícula a partir de la formulación.

use nano_domain::Formulation;

use super::NanoparticleModel;

/// Mapa coating → color base; gana la clave coincidente más larga.
const COATING_COLORS: [(&str, u32); 19] = [("PEG", 0x00FF00),
                                           ("PLGA", 0x0000FF),
                                           ("PEG-PLGA", 0x00B3B3),
                                           ("Chitosan", 0xFF0000),
                                           ("Chitosan-PEG", 0xFF7F00),
                                           ("Lipid", 0xFFFF00),
                                           ("Phospholipid", 0xFFD700),
                                           ("Phospholipid-PEG", 0xD4AF37),
                                           ("Gold", 0xFFD700),
                                           ("Thiol-PEG", 0xB8860B),
                                           ("Silica", 0xF5F5F5),
                                           ("PEI-PEG", 0x7FFF00),
                                           ("Transferrin", 0x8B4513),
                                           ("Polysorbate", 0x9400D3),
                                           ("Poloxamer", 0x1E90FF),
                                           ("Albumin", 0xFF00FF),
                                           ("PAMAM-PEG", 0xBA55D3),
                                           ("Hydrogenated Soy PC", 0xDAA520),
                                           ("PEGylated Phospholipid", 0xD2B48C)];

/// Palabras clave por categoría morfológica, en orden de evaluación.
const TYPE_KEYWORDS: [(&str, [&str; 5]); 7] =
    [("polymeric", ["PEG", "PLGA", "Chitosan", "PAMAM", "Polymer"]),
     ("liposome", ["Lipid", "Phospholipid", "Liposome", "PC", "Cholesterol"]),
     ("gold", ["Gold", "Au", "Thiol-PEG", "", ""]),
     ("silica", ["Silica", "SiO2", "Mesoporous", "", ""]),
     ("solid_lipid", ["Solid Lipid", "SLN", "Polysorbate", "Poloxamer", ""]),
     ("dendrimer", ["Dendrimer", "PAMAM", "", "", ""]),
     ("plga-peg", ["PLGA-PEG", "", "", "", ""])];

/// Construye la representación de la nanopartícula: categoría morfológica,
/// color (coating + ajuste por carga), forma, textura y densidad superficial.
pub fn nanoparticle_model(formulation: &Formulation) -> NanoparticleModel {
    let coating = formulation.coating.as_str();
    let coating_lower = coating.to_lowercase();

    let kind = classify(&coating_lower);
    let base_color = coating_color(&coating_lower);
    let color = apply_charge_tint(base_color, formulation.surface_charge_mv);

    let shape = match kind {
        "liposome" => "vesicle",
        "dendrimer" => "branched",
        "plga-peg" => "core-shell",
        _ => "sphere",
    };

    let texture = if coating.contains("PEG") {
        "brush"
    } else if coating.contains("Chitosan") {
        "rough"
    } else if coating.contains("Polysorbate") || coating.contains("Poloxamer") {
        "wavy"
    } else {
        "smooth"
    };

    let surface_density = if coating.contains("PEG") {
        "high"
    } else if coating.contains("Thiol") {
        "sparse"
    } else {
        "medium"
    };

    NanoparticleModel { kind: kind.to_string(),
                        size_nm: formulation.size_nm,
                        color,
                        surface_charge_mv: formulation.surface_charge_mv,
                        coating: coating.to_string(),
                        shape: shape.to_string(),
                        texture: texture.to_string(),
                        surface_density: surface_density.to_string() }
}

/// Categoría morfológica: barrido de palabras clave donde la última categoría
/// coincidente gana, con una cadena de overrides explícitos al final.
fn classify(coating_lower: &str) -> &'static str {
    let mut kind = "polymeric";
    for (type_name, keywords) in TYPE_KEYWORDS {
        for keyword in keywords {
            if !keyword.is_empty() && coating_lower.contains(&keyword.to_lowercase()) {
                kind = type_name;
                break;
            }
        }
    }

    if coating_lower.contains("polymeric") {
        kind = "polymeric";
    } else if coating_lower.contains("liposome") {
        kind = "liposome";
    } else if coating_lower.contains("gold") {
        kind = "gold";
    } else if coating_lower.contains("silica") || coating_lower.contains("mesoporous") {
        kind = "silica";
    } else if coating_lower.contains("solid lipid") {
        kind = "solid_lipid";
    } else if coating_lower.contains("dendrimer") {
        kind = "dendrimer";
    } else if coating_lower.contains("plga-peg") {
        kind = "plga-peg";
    }
    kind
}

fn coating_color(coating_lower: &str) -> u32 {
    let mut color = 0x6C757D;
    let mut best_len = 0;
    for (key, clr) in COATING_COLORS {
        if coating_lower.contains(&key.to_lowercase()) && key.len() > best_len {
            best_len = key.len();
            color = clr;
        }
    }
    color
}

/// Carga positiva aclara el color, negativa lo oscurece, proporcional a la
/// magnitud y acotado a [0.7, 1.3].
fn apply_charge_tint(color: u32, charge_mv: f64) -> u32 {
    if charge_mv == 0.0 {
        return color;
    }
    let factor = if charge_mv > 0.0 {
        (1.0 + charge_mv.abs() / 50.0).min(1.3)
    } else {
        (1.0 - charge_mv.abs() / 50.0).max(0.7)
    };
    let scale = |channel: u32| -> u32 { ((channel as f64 * factor) as u32).min(255) };
    let r = scale((color >> 16) & 0xFF);
    let g = scale((color >> 8) & 0xFF);
    let b = scale(color & 0xFF);
    (r << 16) | (g << 8) | b
}
