//! # Classificador de Caracteres
//!
//! Decide se um caractere pertence a uma palavra (letra ou dígito Unicode)
//! ou é separador (pontuação, espaço, símbolos).
//!
//! A estratégia é detectada uma única vez por processo: se o motor de regex
//! aceita propriedades Unicode (`\p{L}`), usamos a classificação completa;
//! caso contrário caímos numa heurística (dígito ASCII, ou letra cuja forma
//! minúscula difere da maiúscula).

use std::sync::LazyLock;

use regex::Regex;

static SHARED: LazyLock<Classifier> = LazyLock::new(Classifier::detect);

/// Estratégia de classificação de caracteres de palavra.
#[derive(Debug, Clone)]
pub enum Classifier {
    /// Classes Unicode completas: `\p{L}` (letras) e `\p{Nd}` (dígitos decimais).
    Unicode(Regex),
    /// Heurística sem tabelas Unicode: dígitos `0-9` e letras com caixa.
    CaseFolding,
}

impl Classifier {
    /// Detecta a melhor estratégia disponível.
    pub fn detect() -> Self {
        match Regex::new(r"^[\p{L}\p{Nd}]$") {
            Ok(re) => Classifier::Unicode(re),
            Err(e) => {
                tracing::warn!("regex sem suporte a propriedades Unicode, usando heurística: {}", e);
                Classifier::CaseFolding
            }
        }
    }

    /// Instância compartilhada, detectada na primeira chamada.
    pub fn shared() -> &'static Classifier {
        &SHARED
    }

    /// `true` se `ch` é letra ou dígito.
    pub fn is_word_char(&self, ch: char) -> bool {
        match self {
            Classifier::Unicode(re) => {
                let mut buf = [0u8; 4];
                re.is_match(ch.encode_utf8(&mut buf))
            }
            Classifier::CaseFolding => {
                ch.is_ascii_digit() || !ch.to_lowercase().eq(ch.to_uppercase())
            }
        }
    }
}

/// Atalho para [`Classifier::shared`]`.is_word_char(ch)`.
pub fn is_word_char(ch: char) -> bool {
    Classifier::shared().is_word_char(ch)
}
