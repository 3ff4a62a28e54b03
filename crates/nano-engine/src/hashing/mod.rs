//! Hash helpers – abstracción para permitir cambiar de algoritmo sin tocar
//! el resto del motor.

mod stable;

pub use stable::stable_hash;

use blake3::Hasher;

/// Hashea un string y devuelve hex (claves de cache).
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}
