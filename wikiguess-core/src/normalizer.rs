//! # Normalizador — Forma Canônica para Comparação
//!
//! Toda comparação do jogo (stop words, palavras do artigo, palpites) passa por
//! [`normalize`], de modo que "Ко́шка", "кошка" e " КОШКА " sejam a mesma palavra.
//!
//! ## Etapas
//!
//! 1. Converte para minúsculas.
//! 2. Decompõe em NFD e remove **apenas** os acentos tônicos ([`STRESS_MARKS`]).
//!    Diacríticos que fazem parte da letra (`й`) são preservados.
//! 3. Dobra `ё` → `е` (variante ortográfica opcional do russo): todo trema
//!    U+0308 na sequência de marcas de um `е` é descartado.
//! 4. Recompõe em NFC e remove espaços nas bordas.
//!
//! A saída já está na forma final, então uma segunda passada não muda nada.
//! A dobra do passo 3 vale só para comparação: o texto exibido mantém o `ё`.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Acentos tônicos removidos do texto.
///
/// A Wikipédia russa usa quase sempre o acento agudo combinante U+0301;
/// às vezes o grave U+0300, o U+0341, ou os símbolos soltos ´ (U+00B4) e ˊ (U+02CA).
pub const STRESS_MARKS: &[char] = &['\u{0301}', '\u{0300}', '\u{0341}', '\u{00B4}', '\u{02CA}'];

/// Remove os acentos tônicos sem tocar na diacrítica das letras.
///
/// Decompõe em NFD, descarta os [`STRESS_MARKS`] e recompõe em NFC, assim
/// `й` (и + breve) e `ё` (е + trema) voltam a ser um único caractere.
pub fn strip_stress_marks(s: &str) -> String {
    s.nfd()
        .filter(|c| !STRESS_MARKS.contains(c))
        .nfc()
        .collect()
}

const COMBINING_DIAERESIS: char = '\u{0308}';

/// Forma canônica usada em todas as comparações. Idempotente.
pub fn normalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut folded = String::with_capacity(lower.len());
    let mut starter = None;
    // o segundo nfd reordena as marcas que ficaram vizinhas após o filtro
    for ch in lower.nfd().filter(|c| !STRESS_MARKS.contains(c)).nfd() {
        if canonical_combining_class(ch) == 0 {
            starter = Some(ch);
        } else if ch == COMBINING_DIAERESIS && starter == Some('е') {
            continue;
        }
        folded.push(ch);
    }
    folded.nfc().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_combining_acute() {
        assert_eq!(strip_stress_marks("ко\u{0301}шка"), "кошка");
        assert_eq!(strip_stress_marks("мо\u{0300}ре"), "море");
    }

    #[test]
    fn test_strip_free_standing_accents() {
        assert_eq!(strip_stress_marks("ко´шка"), "кошка");
        assert_eq!(strip_stress_marks("коˊшка"), "кошка");
    }

    #[test]
    fn test_strip_keeps_letter_diacritics() {
        // й e ё não podem perder a breve/trema
        assert_eq!(strip_stress_marks("йод"), "йод");
        assert_eq!(strip_stress_marks("ёж"), "ёж");
        assert_eq!(strip_stress_marks("naïve"), "naïve");
    }

    #[test]
    fn test_strip_precomposed_acute() {
        // "é" pré-composto também carrega um acento agudo
        assert_eq!(strip_stress_marks("café"), "cafe");
    }

    #[test]
    fn test_normalize_pipeline() {
        assert_eq!(normalize("  Ко\u{0301}ШКА "), "кошка");
        assert_eq!(normalize("Ёлка"), "елка");
        assert_eq!(normalize("ёж"), "еж");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_folds_stacked_diaeresis() {
        assert_eq!(normalize("ё\u{0308}"), "е");
        assert_eq!(normalize("Ё\u{0308}"), "е");
        assert_eq!(normalize("е\u{0308}\u{0301}"), "е");
        assert_eq!(normalize("Ё\u{0323}"), "е\u{0323}");
        assert_eq!(normalize("T\u{0308}"), "\u{1E97}");
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut checked = 0;
        for c in (0..0x3_0000).filter_map(char::from_u32) {
            let forms = [
                c.to_string(),
                format!("a{c}"),
                format!("{c}\u{0301}"),
                format!("{c}\u{0308}"),
                format!("Ё{c}"),
            ];
            for s in &forms {
                let once = normalize(s);
                assert_eq!(normalize(&once), once, "normalize não é idempotente para {:?}", s);
                checked += 1;
            }
        }
        assert!(checked > 100_000);

        for s in [" Ко\u{0301}шка ", "ЙОД", "İstanbul", "ΟΔΟΣ", "´", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "normalize não é idempotente para {:?}", s);
        }
    }
}
