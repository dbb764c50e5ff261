//! # Tokenizador — Palavras e Separadores
//!
//! Divide o texto em tokens de dois tipos:
//!
//! - **Word**: sequência máxima de letras/dígitos (ver [`crate::classifier`]).
//! - **Separator**: um único caractere que não é letra nem dígito
//!   (espaço, pontuação, quebra de linha...).
//!
//! Diferente de tokenizadores de NLP, nada é descartado: concatenar os textos
//! dos tokens reconstrói exatamente a entrada. Cada token guarda seus offsets
//! de byte para que a camada de exibição possa apontar para o texto original.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wikiguess_core::tokenizer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("Кошка сидит.");
//! let words: Vec<&str> = tokens
//!     .iter()
//!     .filter(|t| t.kind == TokenKind::Word)
//!     .map(|t| t.text.as_str())
//!     .collect();
//! assert_eq!(words, ["Кошка", "сидит"]);
//! assert_eq!(tokens.len(), 4); // "Кошка", " ", "сидит", "."
//! ```

use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;

/// Tipo do token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Sequência de letras/dígitos — unidade adivinhável.
    Word,
    /// Um único caractere separador.
    Separator,
}

/// Um token extraído do texto.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Кошка", " ", ".").
    pub text: String,
    pub kind: TokenKind,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Tokeniza usando o classificador compartilhado do processo.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with(text, Classifier::shared())
}

/// Tokeniza com um classificador explícito.
///
/// Percorre o texto por *code point*, nunca dividindo um caractere multibyte.
pub fn tokenize_with(text: &str, classifier: &Classifier) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start = 0;
    let mut current_text = String::new();

    for (byte_pos, ch) in text.char_indices() {
        if classifier.is_word_char(ch) {
            if current_text.is_empty() {
                current_start = byte_pos;
            }
            current_text.push(ch);
        } else {
            flush_word(&mut tokens, &mut current_text, current_start, byte_pos);
            push_separator(&mut tokens, ch, byte_pos);
        }
    }
    flush_word(&mut tokens, &mut current_text, current_start, text.len());

    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

/// Fecha a palavra acumulada e adiciona à lista (se não vazia)
fn flush_word(tokens: &mut Vec<Token>, text: &mut String, start: usize, end: usize) {
    if !text.is_empty() {
        tokens.push(Token {
            text: std::mem::take(text),
            kind: TokenKind::Word,
            start,
            end,
            index: 0, // atribuído no final
        });
    }
}

fn push_separator(tokens: &mut Vec<Token>, ch: char, start: usize) {
    tokens.push(Token {
        text: ch.to_string(),
        kind: TokenKind::Separator,
        start,
        end: start + ch.len_utf8(),
        index: 0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Кошка сидит. Кошка спит.");
        assert_eq!(
            texts(&tokens),
            ["Кошка", " ", "сидит", ".", " ", "Кошка", " ", "спит", "."]
        );
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[1].kind, TokenKind::Separator);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_reconstruction() {
        let samples = [
            "Кошка сидит. Кошка спит.",
            "«Шахматы» — настольная игра (с VI века), 64 клетки!",
            "  trailing spaces and\nnew lines\n\n",
            "naïve café 中文 🙂 ok",
            "word",
            "...",
        ];
        for s in samples {
            let rebuilt: String = tokenize(s).iter().map(|t| t.text.as_str()).collect();
            assert_eq!(rebuilt, s);
        }
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "Ёж, 12 ежей";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_separators_are_single_chars() {
        let tokens = tokenize("a -- b");
        assert_eq!(texts(&tokens), ["a", " ", "-", "-", " ", "b"]);
        assert!(tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Separator)
            .all(|t| t.text.chars().count() == 1));
    }

    #[test]
    fn test_digits_join_words() {
        let tokens = tokenize("COVID19 в 2020г.");
        assert_eq!(texts(&tokens), ["COVID19", " ", "в", " ", "2020г", "."]);
    }

    #[test]
    fn test_replacement_char_is_separator() {
        let text = String::from_utf8_lossy(b"ab\xFFcd").into_owned();
        let tokens = tokenize(&text);
        assert_eq!(texts(&tokens), ["ab", "\u{FFFD}", "cd"]);
    }

    #[test]
    fn test_indices_sequential() {
        let tokens = tokenize("один, два");
        for (i, t) in tokens.iter().enumerate() {
            assert_eq!(t.index, i);
        }
    }
}
