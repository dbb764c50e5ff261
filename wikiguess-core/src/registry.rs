//! # Registro de Palavras — Estado do Artigo
//!
//! Para cada palavra do artigo guarda a forma original, a forma normalizada,
//! a chave de comparação (prefixo de 5 caracteres) e a máscara, além do estado
//! mutável `revealed`/`highlighted`.
//!
//! O registro é o **modelo**: a camada de exibição apenas lê
//! [`WordRegistry::display`] e nunca guarda estado próprio.
//!
//! ## Fluxo de Construção
//!
//! 1. Remove acentos tônicos do texto ([`strip_stress_marks`]).
//! 2. Tokeniza ([`tokenize`]).
//! 3. Cada palavra vira um [`WordEntry`] + [`DisplayUnit::Word`];
//!    cada separador vira [`DisplayUnit::Text`].
//! 4. [`WordRegistry::apply_initial_reveal`] revela as stop words.

use serde::{Deserialize, Serialize};

use crate::masker::mask;
use crate::normalizer::{normalize, strip_stress_marks};
use crate::stopwords::StopWordSet;
use crate::tokenizer::{tokenize, TokenKind};

/// Tamanho do prefixo usado como chave de comparação.
pub const KEY_LEN: usize = 5;

/// Chave de comparação: a string inteira se tiver menos de [`KEY_LEN`]
/// caracteres, senão os primeiros [`KEY_LEN`] caracteres.
pub fn key_for(normalized: &str) -> String {
    if normalized.chars().count() < KEY_LEN {
        normalized.to_string()
    } else {
        normalized.chars().take(KEY_LEN).collect()
    }
}

/// Uma palavra do artigo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Forma exata no texto (já sem acentos tônicos).
    pub original: String,
    /// `original` normalizado; usado na busca de stop words e palpites curtos.
    pub normalized: String,
    /// [`key_for`] de `normalized`.
    pub key: String,
    /// Placeholder com o mesmo número de caracteres de `original`.
    pub mask: String,
    pub revealed: bool,
    /// Casou com o palpite mais recente.
    pub highlighted: bool,
}

impl WordEntry {
    pub fn new(original: &str) -> Self {
        let normalized = normalize(original);
        let key = key_for(&normalized);
        Self {
            original: original.to_string(),
            mask: mask(original),
            normalized,
            key,
            revealed: false,
            highlighted: false,
        }
    }

    /// Texto a exibir: original se revelada, máscara caso contrário.
    pub fn display_text(&self) -> &str {
        if self.revealed {
            &self.original
        } else {
            &self.mask
        }
    }
}

/// Identificador de uma palavra no registro (índice em `entries`).
pub type EntryId = usize;

/// Unidade de exibição, na ordem do texto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DisplayUnit {
    /// Separador literal (espaço, pontuação, quebra de linha).
    Text(String),
    /// Referência para um [`WordEntry`].
    Word(EntryId),
}

/// Item pronto para renderização, emprestado do registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayItem<'a> {
    Text(&'a str),
    Word {
        id: EntryId,
        text: &'a str,
        revealed: bool,
        highlighted: bool,
    },
}

/// Registro de todas as palavras de um artigo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRegistry {
    units: Vec<DisplayUnit>,
    entries: Vec<WordEntry>,
}

impl WordRegistry {
    /// Constrói o registro e aplica a revelação inicial das stop words.
    pub fn build(text: &str, stop_words: &StopWordSet) -> Self {
        let mut registry = Self::tokenize_into_registry(text);
        registry.apply_initial_reveal(stop_words);
        tracing::debug!(
            "registro construído: {} palavras, {} reveladas",
            registry.entries.len(),
            registry.revealed_count()
        );
        registry
    }

    fn tokenize_into_registry(text: &str) -> Self {
        let clean = strip_stress_marks(text);
        let mut units = Vec::new();
        let mut entries = Vec::new();

        for token in tokenize(&clean) {
            match token.kind {
                TokenKind::Word => {
                    units.push(DisplayUnit::Word(entries.len()));
                    entries.push(WordEntry::new(&token.text));
                }
                TokenKind::Separator => units.push(DisplayUnit::Text(token.text)),
            }
        }
        Self { units, entries }
    }

    /// Revela exatamente as palavras cuja forma normalizada é stop word.
    pub fn apply_initial_reveal(&mut self, stop_words: &StopWordSet) {
        for entry in &mut self.entries {
            entry.revealed = stop_words.contains(&entry.normalized);
        }
    }

    /// Muda o estado de uma palavra. Ids inexistentes são ignorados.
    pub fn set_revealed(&mut self, id: EntryId, revealed: bool) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.revealed = revealed;
        }
    }

    /// Modo mascarado/aberto. Stop words permanecem sempre reveladas;
    /// as demais ficam reveladas somente se `masked == false`.
    pub fn set_masked_mode(&mut self, masked: bool, stop_words: &StopWordSet) {
        for entry in &mut self.entries {
            entry.revealed = stop_words.contains(&entry.normalized) || !masked;
        }
    }

    /// Ação "abrir tudo".
    pub fn open_all(&mut self, stop_words: &StopWordSet) {
        self.set_masked_mode(false, stop_words);
    }

    pub fn clear_highlight(&mut self) {
        for entry in &mut self.entries {
            entry.highlighted = false;
        }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [WordEntry] {
        &mut self.entries
    }

    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revealed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.revealed).count()
    }

    /// Sequência de exibição na ordem do texto.
    pub fn display(&self) -> impl Iterator<Item = DisplayItem<'_>> + '_ {
        self.units.iter().filter_map(move |unit| match unit {
            DisplayUnit::Text(s) => Some(DisplayItem::Text(s.as_str())),
            DisplayUnit::Word(id) => self.entries.get(*id).map(|e| DisplayItem::Word {
                id: *id,
                text: e.display_text(),
                revealed: e.revealed,
                highlighted: e.highlighted,
            }),
        })
    }

    /// Texto exibido, concatenado.
    pub fn render_plain(&self) -> String {
        self.display()
            .map(|item| match item {
                DisplayItem::Text(s) => s,
                DisplayItem::Word { text, .. } => text,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(words: &[&str]) -> StopWordSet {
        StopWordSet::from_raw(words)
    }

    #[test]
    fn test_key_truncation() {
        assert_eq!(key_for(""), "");
        assert_eq!(key_for("кош"), "кош");
        assert_eq!(key_for("кошк"), "кошк");
        assert_eq!(key_for("кошка"), "кошка");
        assert_eq!(key_for("кошкин"), "кошки");
        assert_eq!(key_for("достопримечательность"), "досто");
    }

    #[test]
    fn test_entry_fields() {
        let e = WordEntry::new("Ёлка");
        assert_eq!(e.original, "Ёлка");
        assert_eq!(e.normalized, "елка");
        assert_eq!(e.key, "елка");
        assert_eq!(e.mask, "□□□□");
        assert!(!e.revealed);
        assert_eq!(e.display_text(), "□□□□");
    }

    #[test]
    fn test_build_scenario() {
        let reg = WordRegistry::build("Кошка сидит. Кошка спит.", &stop(&["сидит"]));
        let originals: Vec<&str> = reg.entries().iter().map(|e| e.original.as_str()).collect();
        assert_eq!(originals, ["Кошка", "сидит", "Кошка", "спит"]);
        let revealed: Vec<bool> = reg.entries().iter().map(|e| e.revealed).collect();
        assert_eq!(revealed, [false, true, false, false]);
        assert_eq!(reg.render_plain(), "□□□□□ сидит. □□□□□ □□□□.");
    }

    #[test]
    fn test_build_strips_stress_marks() {
        let reg = WordRegistry::build("Ко\u{0301}шка", &StopWordSet::new());
        assert_eq!(reg.entries()[0].original, "Кошка");
        assert_eq!(reg.entries()[0].mask.chars().count(), 5);
    }

    #[test]
    fn test_build_empty_inputs() {
        let reg = WordRegistry::build("", &stop(&["и"]));
        assert!(reg.is_empty());
        assert!(reg.units().is_empty());

        let reg = WordRegistry::build("и кот", &StopWordSet::new());
        assert_eq!(reg.revealed_count(), 0);
    }

    #[test]
    fn test_masked_mode_keeps_stop_words() {
        let sw = stop(&["и"]);
        let mut reg = WordRegistry::build("кот и пёс", &sw);

        reg.open_all(&sw);
        assert_eq!(reg.revealed_count(), 3);
        assert_eq!(reg.render_plain(), "кот и пёс");

        reg.set_masked_mode(true, &sw);
        assert_eq!(reg.render_plain(), "□□□ и □□□");
    }

    #[test]
    fn test_set_revealed_out_of_range() {
        let mut reg = WordRegistry::build("кот", &StopWordSet::new());
        reg.set_revealed(0, true);
        reg.set_revealed(99, true);
        assert_eq!(reg.render_plain(), "кот");
    }
}
