//! The parent option set.
//!
//! Artículo 10 of the Ley de Acceso a la Información Pública enumerates 29
//! numerales (incisos). The set is fixed by the law, so the picker carries
//! the codes itself instead of asking the portal for them.

pub const NUMERAL_MIN: u32 = 1;
pub const NUMERAL_MAX: u32 = 29;

#[derive(Debug, Clone)]
pub struct Numeral {
    pub codigo: u32,
    pub etiqueta: String,
}

pub fn all() -> Vec<Numeral> {
    (NUMERAL_MIN..=NUMERAL_MAX)
        .map(|codigo| Numeral {
            codigo,
            etiqueta: format!("Numeral {}", codigo),
        })
        .collect()
}

pub fn is_valid(codigo: u32) -> bool {
    (NUMERAL_MIN..=NUMERAL_MAX).contains(&codigo)
}
