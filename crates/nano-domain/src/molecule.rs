use serde::{Deserialize, Serialize};

use crate::DomainError;
use std::fmt;

/// Identificador molecular validado (notación SMILES).
///
/// La validación es puramente sintáctica: conjunto de símbolos permitido y
/// balanceo de los tres tipos de corchetes. No se valida química real.
/// Inmutable una vez construido; el constructor normaliza recortando espacios
/// en blanco circundantes (sin cambio de mayúsculas).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoleculeIdentifier {
    smiles: String,
}

impl MoleculeIdentifier {
    /// Construye un identificador validado a partir de texto crudo.
    ///
    /// # Errors
    ///
    /// Retorna `DomainError::Validation` si la cadena está vacía, contiene
    /// símbolos fuera del conjunto permitido, o sus corchetes no balancean.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("empty SMILES string".to_string()));
        }
        if !is_valid_smiles(trimmed) {
            return Err(DomainError::Validation(format!("invalid SMILES string: {trimmed}")));
        }
        Ok(Self { smiles: trimmed.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.smiles
    }

    /// Cantidad de ocurrencias de un carácter (insumo de las heurísticas).
    pub fn count_char(&self, c: char) -> usize {
        self.smiles.chars().filter(|&x| x == c).count()
    }

    /// Cantidad de ocurrencias de una subcadena (solapamientos no contados).
    pub fn count_substr(&self, pat: &str) -> usize {
        self.smiles.matches(pat).count()
    }

    pub fn len(&self) -> usize {
        self.smiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.smiles.is_empty()
    }
}

impl fmt::Display for MoleculeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.smiles)
    }
}

/// Valida sintácticamente una cadena SMILES.
///
/// Filtro sintáctico, no un parser químico: símbolos permitidos
/// `{letras, dígitos, @ - + [ ] ( ) \ / # $ . = ~ :}` y balanceo estricto
/// de `()`, `[]` y `{}` (tipos cruzados rechazados).
pub fn is_valid_smiles(smiles: &str) -> bool {
    if smiles.is_empty() {
        return false;
    }
    if !smiles.chars().all(allowed_symbol) {
        return false;
    }
    brackets_balanced(smiles)
}

fn allowed_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '@' | '-' | '+' | '[' | ']' | '(' | ')' | '\\' | '/' | '#' | '$' | '.' | '=' | '~' | ':')
}

/// Balanceo por pila de los tres tipos de corchetes.
fn brackets_balanced(smiles: &str) -> bool {
    let mut stack: Vec<char> = Vec::new();
    for c in smiles.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let Some(top) = stack.pop() else {
                    return false;
                };
                let matches_type = matches!((top, c), ('(', ')') | ('[', ']') | ('{', '}'));
                if !matches_type {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}
