//! # Máscara de Palavras
//!
//! Converte uma palavra em placeholders do mesmo tamanho (em caracteres):
//! cada letra/dígito vira [`MASK_GLYPH`], o resto passa inalterado.

use crate::classifier::Classifier;

/// Glifo que substitui cada letra ou dígito.
pub const MASK_GLYPH: char = '□';

/// Máscara com o classificador compartilhado.
pub fn mask(token: &str) -> String {
    mask_with(token, Classifier::shared())
}

/// Máscara com um classificador explícito. Itera por code point, então
/// `mask(w).chars().count() == w.chars().count()` sempre.
pub fn mask_with(token: &str, classifier: &Classifier) -> String {
    token
        .chars()
        .map(|ch| if classifier.is_word_char(ch) { MASK_GLYPH } else { ch })
        .collect()
}
