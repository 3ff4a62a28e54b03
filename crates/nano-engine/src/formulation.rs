//! Generador de formulaciones de nanopartículas.
//!
//! Lookup exacto para moléculas de referencia; para el resto, cadena de
//! prioridad sobre el contenido del identificador (primera regla que aplica
//! gana, sin fallthrough) más selecciones moduladas por `stable_hash`. La
//! idempotencia es parte del contrato: mismo identificador, misma
//! formulación, siempre.

use nano_domain::{Formulation, MoleculeIdentifier};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::hashing::stable_hash;

const NANO_TYPES: [&str; 7] = [
    "Polymeric",
    "Liposome",
    "Solid Lipid Nanoparticle",
    "Gold Nanoparticle",
    "Mesoporous Silica",
    "Dendrimer",
    "PLGA-PEG",
];

/// Métodos de carga disponibles por tipo de carrier.
const LOADING_METHODS: [(&str, [&str; 3]); 7] = [
    ("Liposome", ["Passive Encapsulation", "Remote Loading", "Film Hydration"]),
    ("Polymeric", ["Solvent Displacement", "Nanoprecipitation", "Emulsion Polymerization"]),
    ("Solid Lipid Nanoparticle", ["Hot Homogenization", "Microemulsion", "Solvent Evaporation"]),
    ("Gold Nanoparticle", ["Surface Conjugation", "Layer-by-Layer Assembly", "Click Chemistry"]),
    ("Mesoporous Silica", ["Pore Adsorption", "Co-Condensation", "Post-Synthetic Grafting"]),
    ("Dendrimer", ["Encapsulation", "Conjugation", "Complexation"]),
    ("PLGA-PEG", ["Double Emulsion", "Nanoprecipitation", "Spray Drying"]),
];

const LOADING_RATIONALES: [(&str, &str); 20] = [
    ("Passive Encapsulation",
     "Passive encapsulation in the aqueous core or lipid bilayer depending on drug solubility properties."),
    ("Remote Loading",
     "Remote loading uses pH gradients to achieve high drug loading efficiency within the liposome interior."),
    ("Film Hydration",
     "Film hydration method provides controlled lamellarity and size for optimal drug encapsulation."),
    ("Solvent Displacement",
     "Solvent displacement method allows efficient incorporation of the drug into the polymer matrix during particle formation."),
    ("Nanoprecipitation",
     "Nanoprecipitation provides high encapsulation efficiency while preserving drug activity."),
    ("Emulsion Polymerization",
     "Emulsion polymerization enables precise control of particle size and drug distribution."),
    ("Hot Homogenization",
     "Hot homogenization method incorporates the drug into the lipid matrix during particle formation, providing good loading capacity."),
    ("Microemulsion",
     "Microemulsion technique creates highly stable nanoparticles with uniform size distribution."),
    ("Solvent Evaporation",
     "Solvent evaporation method ensures high drug loading and uniform particle characteristics."),
    ("Surface Conjugation",
     "Surface conjugation via thiol linkages or EDC/NHS chemistry provides stable attachment while preserving drug activity."),
    ("Layer-by-Layer Assembly",
     "Layer-by-layer assembly enables precise control of drug release through multilayer barriers."),
    ("Click Chemistry",
     "Click chemistry provides highly specific and efficient drug conjugation to the nanoparticle surface."),
    ("Pore Adsorption",
     "Pore adsorption maximizes drug loading capacity within the silica matrix for sustained release."),
    ("Co-Condensation",
     "Co-condensation method integrates the drug during particle synthesis for high loading efficiency."),
    ("Post-Synthetic Grafting",
     "Post-synthetic grafting allows precise control of drug attachment sites and density."),
    ("Encapsulation",
     "Encapsulation within dendrimer cavities provides protection from degradation and controlled release."),
    ("Conjugation",
     "Conjugation to dendrimer surface groups offers high drug payload and targeted delivery."),
    ("Complexation",
     "Complexation with dendrimer functional groups enables high loading capacity and pH-responsive release."),
    ("Double Emulsion",
     "Double emulsion technique maximizes encapsulation of hydrophilic drugs within the PLGA-PEG matrix."),
    ("Spray Drying",
     "Spray drying provides scalable production of drug-loaded particles with good encapsulation efficiency."),
];

/// Formulaciones fijas para las moléculas de referencia.
static KNOWN_FORMULATIONS: Lazy<HashMap<&'static str, Formulation>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("CC(=O)OC1=CC=CC=C1C(=O)O", Formulation {
        nanoparticle_type: "Liposome".into(),
        coating: "Phospholipid-PEG".into(),
        size_nm: 85.0,
        surface_charge_mv: -22.0,
        loading_method: "Passive Encapsulation".into(),
        type_rationale: "Liposomes are ideal for aspirin delivery due to their ability to encapsulate both hydrophilic and hydrophobic regions of the molecule.".into(),
        coating_rationale: "Phospholipid-PEG coating provides stealth properties, extending circulation time and reducing immune recognition for aspirin delivery.".into(),
        size_rationale: "The 85 nm size optimizes cellular uptake and effective aspirin delivery to inflamed tissues.".into(),
        charge_rationale: "The negative charge of -22 mV complements aspirin's carboxylic acid group while ensuring stable suspension in circulation.".into(),
        loading_rationale: "Passive encapsulation is optimal for aspirin, allowing drug loading in both the bilayer and aqueous core.".into(),
        summary: "This liposome formulation with Phospholipid-PEG coating is specifically designed for aspirin delivery. The 85 nm size and -22 mV surface charge work synergistically with passive encapsulation to achieve efficient drug loading, optimal stability, and targeted release of aspirin at inflammatory sites. This design provides excellent bioavailability and sustained release profile.".into(),
    });
    m.insert("CC(C)CC1=CC=C(C=C1)C(C)C(=O)O", Formulation {
        nanoparticle_type: "Solid Lipid Nanoparticle".into(),
        coating: "Polysorbate 80".into(),
        size_nm: 120.0,
        surface_charge_mv: -18.0,
        loading_method: "Hot Homogenization".into(),
        type_rationale: "Solid lipid nanoparticles are ideal for ibuprofen's lipophilic structure and provide sustained release properties.".into(),
        coating_rationale: "Polysorbate 80 enhances stability and provides potential for blood-brain barrier crossing, extending ibuprofen's applications.".into(),
        size_rationale: "The optimal size of 120 nm balances circulation time with ability to penetrate inflamed tissues for ibuprofen delivery.".into(),
        charge_rationale: "A negative charge of -18 mV ensures good colloidal stability and reduces aggregation while complementing ibuprofen's carboxyl group.".into(),
        loading_rationale: "Hot homogenization achieves high ibuprofen loading capacity within the lipid matrix for sustained release.".into(),
        summary: "This solid lipid nanoparticle formulation with Polysorbate 80 coating optimizes ibuprofen delivery with 120 nm size and -18 mV surface charge. The hot homogenization method ensures efficient drug incorporation and sustained release profile. This design significantly enhances ibuprofen bioavailability and reduces dosing frequency.".into(),
    });
    m.insert("CC(=O)NC1=CC=C(O)C=C1", Formulation {
        nanoparticle_type: "Polymeric".into(),
        coating: "Chitosan-PEG".into(),
        size_nm: 95.0,
        surface_charge_mv: -5.0,
        loading_method: "Nanoprecipitation".into(),
        type_rationale: "Polymeric nanoparticles provide controlled release kinetics ideal for paracetamol's metabolism profile.".into(),
        coating_rationale: "Chitosan-PEG offers mucoadhesive properties and enhanced permeation for improved paracetamol delivery.".into(),
        size_rationale: "The 95 nm diameter maximizes paracetamol delivery efficiency while maintaining good circulation properties.".into(),
        charge_rationale: "A slightly negative charge of -5 mV balances stability with reduced opsonization for optimal paracetamol delivery.".into(),
        loading_rationale: "Nanoprecipitation provides high encapsulation efficiency for paracetamol while preserving drug activity.".into(),
        summary: "This polymeric nanoparticle system with Chitosan-PEG coating is optimized for paracetamol delivery. The 95 nm particles with -5 mV surface charge and nanoprecipitation loading provide balanced release kinetics that match paracetamol's therapeutic window. This formulation enhances bioavailability while reducing potential hepatotoxicity through controlled release.".into(),
    });
    m.insert("CN1C=NC2=C1C(=O)N(C(=O)N2C)C", Formulation {
        nanoparticle_type: "Mesoporous Silica".into(),
        coating: "PEI-PEG".into(),
        size_nm: 110.0,
        surface_charge_mv: 8.0,
        loading_method: "Pore Adsorption".into(),
        type_rationale: "Mesoporous silica nanoparticles provide excellent pore structure for optimal caffeine loading and controlled release.".into(),
        coating_rationale: "PEI-PEG coating offers pH-responsive release properties ideal for caffeine delivery to target tissues.".into(),
        size_rationale: "The 110 nm size optimizes caffeine delivery through extended circulation while maintaining good tissue penetration.".into(),
        charge_rationale: "A positive charge of +8 mV enhances cellular uptake of caffeine-loaded particles in target tissues.".into(),
        loading_rationale: "Pore adsorption maximizes caffeine loading capacity within the silica matrix for sustained release.".into(),
        summary: "This mesoporous silica nanoparticle system with PEI-PEG coating provides optimal caffeine delivery characteristics. With 110 nm size and +8 mV surface charge, the particles offer high loading capacity and pH-responsive release. This formulation extends caffeine's half-life while providing more sustained stimulant effects compared to conventional delivery.".into(),
    });
    m.insert("C1=CC(=C(C=C1CCN)O)O", Formulation {
        nanoparticle_type: "PLGA-PEG".into(),
        coating: "Transferrin".into(),
        size_nm: 75.0,
        surface_charge_mv: -8.0,
        loading_method: "Double Emulsion".into(),
        type_rationale: "PLGA-PEG nanoparticles protect dopamine from degradation and oxidation while providing blood-brain barrier crossing potential.".into(),
        coating_rationale: "Transferrin coating enables receptor-mediated transcytosis across the blood-brain barrier for enhanced dopamine delivery.".into(),
        size_rationale: "The smaller 75 nm size facilitates passage through the blood-brain barrier for effective dopamine delivery to the CNS.".into(),
        charge_rationale: "A moderate negative charge of -8 mV balances stability with minimal protein adsorption for optimal dopamine delivery.".into(),
        loading_rationale: "Double emulsion technique maximizes encapsulation of hydrophilic dopamine while protecting it from degradation.".into(),
        summary: "This PLGA-PEG nanoparticle formulation with transferrin targeting is specifically designed for dopamine delivery to the central nervous system. The 75 nm particles with -8 mV charge are optimized for blood-brain barrier penetration. The double emulsion loading method prevents dopamine degradation and provides sustained release, offering potential for Parkinson's disease and other dopaminergic disorders.".into(),
    });
    m
});

/// Genera la formulación de nanopartícula para un identificador.
pub fn generate_formulation(id: &MoleculeIdentifier) -> Formulation {
    if let Some(known) = KNOWN_FORMULATIONS.get(id.as_str()) {
        return known.clone();
    }
    fallback_formulation(id)
}

/// Carrier, coating y rationales elegidos por la cadena de prioridad.
struct CarrierChoice {
    nanoparticle_type: &'static str,
    coating: &'static str,
    type_rationale: &'static str,
    coating_rationale: &'static str,
}

fn fallback_formulation(id: &MoleculeIdentifier) -> Formulation {
    let smiles = id.as_str();
    let hash = stable_hash(smiles);

    let choice = select_carrier(id, hash);

    // Tamaño en el rango 70-130 nm.
    let size_nm = (80_i64 + ((hash % 60) as i64 - 10)).clamp(70, 130) as f64;
    let size_rationale = format!(
        "The optimal size of {size_nm:.0} nm balances cellular uptake efficiency, circulation time, and accumulation at target sites."
    );

    let (surface_charge_mv, charge_rationale) = select_charge(id, hash);

    let loading_method = select_loading_method(choice.nanoparticle_type, hash);
    let loading_rationale = LOADING_RATIONALES
        .iter()
        .find(|(k, _)| *k == loading_method)
        .map(|(_, v)| (*v).to_string())
        .unwrap_or_else(|| {
            "This method provides efficient drug loading while maintaining drug stability."
                .to_string()
        });

    let summary = format!(
        "This {} formulation with {} coating is designed to optimize delivery of the provided drug molecule. The {size_nm:.0} nm size and {surface_charge_mv:.0} mV surface charge work synergistically with the {} method to achieve efficient drug loading, good stability, and appropriate release kinetics. This design balances circulation time, target tissue penetration, and cellular uptake for improved therapeutic efficacy.",
        choice.nanoparticle_type.to_lowercase(),
        choice.coating,
        loading_method.to_lowercase(),
    );

    Formulation {
        nanoparticle_type: choice.nanoparticle_type.to_string(),
        coating: choice.coating.to_string(),
        size_nm,
        surface_charge_mv,
        loading_method: loading_method.to_string(),
        type_rationale: choice.type_rationale.to_string(),
        coating_rationale: choice.coating_rationale.to_string(),
        size_rationale,
        charge_rationale,
        loading_rationale,
        summary,
    }
}

/// Cadena de prioridad de buckets: sólo aplica la primera regla que matchea.
/// El orden y los offsets de índice son parte del contrato determinista.
fn select_carrier(id: &MoleculeIdentifier, hash: u64) -> CarrierChoice {
    let smiles = id.as_str();
    let nanoparticle_type = if smiles.contains('O') && smiles.contains('N') {
        NANO_TYPES[(hash % 3) as usize]
    } else if id.count_char('O') > 3 {
        NANO_TYPES[(hash % 3) as usize + 1]
    } else if smiles.contains('C') && id.len() > 20 {
        NANO_TYPES[(hash % 3) as usize + 2]
    } else {
        NANO_TYPES[(hash % 4) as usize + 3]
    };

    match nanoparticle_type {
        "Polymeric" => CarrierChoice {
            nanoparticle_type,
            coating: "PEG-PLGA",
            type_rationale: "Polymeric nanoparticles with PEG-PLGA coating are versatile carriers that work well with compounds containing both oxygen and nitrogen functional groups.",
            coating_rationale: "PEG-PLGA provides excellent biocompatibility, controlled drug release, and good stability in circulation.",
        },
        "Liposome" => CarrierChoice {
            nanoparticle_type,
            coating: "Phospholipid-PEG",
            type_rationale: "Liposomes are ideal for compounds with both hydrophilic and hydrophobic regions, offering versatile encapsulation of complex structures.",
            coating_rationale: "Phospholipid-PEG coating provides stealth properties, extending circulation time and reducing immune recognition.",
        },
        "Solid Lipid Nanoparticle" => CarrierChoice {
            nanoparticle_type,
            coating: "Polysorbate 80",
            type_rationale: "Solid lipid nanoparticles offer good stability for molecules with multiple functional groups, providing sustained release properties.",
            coating_rationale: "Polysorbate 80 enhances stability and provides potential for BBB crossing, extending therapeutic applications.",
        },
        "Gold Nanoparticle" => CarrierChoice {
            nanoparticle_type,
            coating: "Thiol-PEG",
            type_rationale: "Gold nanoparticles offer versatile surface chemistry for a wide range of drug types.",
            coating_rationale: "Thiol-PEG provides excellent stability and biocompatibility for gold nanoparticles.",
        },
        "Mesoporous Silica" => CarrierChoice {
            nanoparticle_type,
            coating: "PEI-PEG",
            type_rationale: "Mesoporous silica offers high surface area and tunable pore size for optimal drug loading.",
            coating_rationale: "PEI-PEG provides pH-responsive release and enhanced cellular uptake.",
        },
        "Dendrimer" => CarrierChoice {
            nanoparticle_type,
            coating: "PAMAM-PEG",
            type_rationale: "Dendrimers offer high loading capacity for large, complex molecular structures.",
            coating_rationale: "PAMAM-PEG provides good biocompatibility and reduced toxicity for dendrimer systems.",
        },
        _ => CarrierChoice {
            nanoparticle_type: "PLGA-PEG",
            coating: "PEGylated Phospholipid",
            type_rationale: "PLGA-PEG nanoparticles offer excellent versatility for various drug structures.",
            coating_rationale: "PEGylated phospholipid coating enhances stability and circulation time.",
        },
    }
}

/// Carga superficial según grupos funcionales detectados por subcadenas.
fn select_charge(id: &MoleculeIdentifier, hash: u64) -> (f64, String) {
    let smiles = id.as_str();
    if smiles.contains("COO") || smiles.contains("COOH") {
        let charge = -(15.0 + (hash % 20) as f64);
        let rationale = format!(
            "Negative surface charge ({charge:.0} mV) complements the carboxylic acid groups in the drug, enhancing loading efficiency while maintaining repulsion from negatively charged cell components."
        );
        (charge, rationale)
    } else if smiles.contains('N') && smiles.contains("NH") {
        let charge = 5.0 + (hash % 25) as f64;
        let rationale = format!(
            "Positive surface charge ({charge:.0} mV) balances the amino groups in the drug while enhancing cellular uptake through interaction with the negatively charged cell membrane."
        );
        (charge, rationale)
    } else {
        let charge = -(5.0 + (hash % 15) as f64);
        let rationale = format!(
            "Slightly negative surface charge ({charge:.0} mV) provides good colloidal stability while minimizing non-specific protein adsorption."
        );
        (charge, rationale)
    }
}

fn select_loading_method(nanoparticle_type: &str, hash: u64) -> &'static str {
    LOADING_METHODS
        .iter()
        .find(|(t, _)| *t == nanoparticle_type)
        .map(|(_, methods)| methods[(hash % methods.len() as u64) as usize])
        .unwrap_or("Solvent Displacement")
}
