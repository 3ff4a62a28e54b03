//! nano-engine: motor heurístico determinista de formulación nanofarmacéutica.
//!
//! Todas las operaciones son funciones puras de sus entradas: tablas de
//! referencia exactas para moléculas conocidas y fórmulas cerradas guiadas
//! por un hash estable para el resto. No hay modelo estadístico ni estado
//! mutable requerido; la única estructura compartida es la `TtlCache`.

pub mod batch;
pub mod cache;
pub mod errors;
pub mod estimator;
pub mod formulation;
pub mod geometry;
pub mod hashing;
pub mod scorer;

pub use batch::process_batch;
pub use cache::{spawn_sweeper, Clock, SystemClock, TtlCache};
pub use errors::EngineError;
pub use estimator::estimate_properties;
pub use formulation::generate_formulation;
pub use geometry::{build_visualization, fallback_visualization, interaction_points,
                   molecule_model, nanoparticle_model, Atom, Bond, GeometryModel,
                   InteractionPoint, NanoparticleModel, Visualization};
pub use scorer::score_formulation;
