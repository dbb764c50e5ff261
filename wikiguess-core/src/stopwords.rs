//! # Stop Words
//!
//! Palavras que nunca são mascaradas (preposições, conjunções...).
//! O conjunto guarda somente formas já normalizadas, para que o registro
//! compare diretamente com [`crate::registry::WordEntry::normalized`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::normalizer::normalize;

/// Lista embutida usada quando nem a rede nem o cache fornecem stop words.
pub const FALLBACK_STOP_WORDS: &[&str] = &[
    "и", "в", "на", "не", "что", "это", "а", "но", "как", "к", "по", "из", "за", "для",
    "от", "до", "о", "у", "с",
];

/// Conjunto de stop words normalizadas. Somente leitura depois de carregado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normaliza cada entrada e descarta as vazias.
    pub fn from_raw<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Lista de reserva ([`FALLBACK_STOP_WORDS`]).
    pub fn fallback() -> Self {
        Self::from_raw(FALLBACK_STOP_WORDS)
    }

    /// `word` deve estar normalizada.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Palavras em ordem alfabética (formato estável para o cache).
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut v: Vec<String> = self.words.iter().cloned().collect();
        v.sort();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_normalizes() {
        let set = StopWordSet::from_raw([" Это ", "Ёще", "", "  "]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("это"));
        assert!(set.contains("еще"));
        assert!(!set.contains("Это"));
    }

    #[test]
    fn test_fallback() {
        let set = StopWordSet::fallback();
        assert_eq!(set.len(), FALLBACK_STOP_WORDS.len());
        assert!(set.contains("для"));
    }

    #[test]
    fn test_empty() {
        assert!(StopWordSet::new().is_empty());
    }
}
