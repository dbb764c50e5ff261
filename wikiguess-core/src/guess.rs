//! # Avaliação de Palpites e Histórico
//!
//! Um palpite revela todas as palavras do artigo que "casam" com ele:
//!
//! | Palpite normalizado | Regra                                      |
//! |---------------------|--------------------------------------------|
//! | menos de 5 chars    | igualdade exata com `normalized`           |
//! | 5 ou mais chars     | mesmos 5 primeiros caracteres (a chave)    |
//!
//! Ex.: "кошкин" revela "кошкина" e "кошки" (chave `кошки`), mas "кошка"
//! não revela "кошкин" — a fronteira do prefixo é exatamente 5.
//!
//! O histórico guarda um registro por **chave**: o primeiro palpite de cada
//! chave define o texto e a contagem exibidos; palpites posteriores com a
//! mesma chave revelam as palavras de novo, mas não alteram o histórico.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::normalizer::normalize;
use crate::registry::{key_for, WordRegistry, KEY_LEN};

/// `word` e `guess` devem estar normalizados.
pub fn matches_guess(word: &str, guess: &str) -> bool {
    if guess.chars().count() < KEY_LEN {
        return word == guess;
    }
    word.chars().take(KEY_LEN).eq(guess.chars().take(KEY_LEN))
}

/// Uma linha do histórico de palpites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// Palpite normalizado (primeiro da chave).
    pub word: String,
    /// Quantas palavras casaram no primeiro palpite da chave.
    pub count: usize,
    /// Sequência de inserção.
    pub order: u64,
    pub key: String,
}

/// Histórico deduplicado por chave.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessHistory {
    records: Vec<GuessRecord>,
    by_key: HashMap<String, usize>,
    next_order: u64,
}

impl GuessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insere o registro se a chave ainda não existe. Retorna `true` se inseriu.
    pub fn record(&mut self, word: &str, key: &str, count: usize) -> bool {
        if self.by_key.contains_key(key) {
            return false;
        }
        self.by_key.insert(key.to_string(), self.records.len());
        self.records.push(GuessRecord {
            word: word.to_string(),
            count,
            order: self.next_order,
            key: key.to_string(),
        });
        self.next_order += 1;
        true
    }

    pub fn get(&self, key: &str) -> Option<&GuessRecord> {
        self.by_key.get(key).map(|&i| &self.records[i])
    }

    /// Registros na ordem de inserção.
    pub fn records(&self) -> &[GuessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ordem de exibição: contagem decrescente; empates pela ordem de inserção
    /// (palpites mais antigos acima).
    pub fn sorted(&self) -> Vec<&GuessRecord> {
        let mut sorted: Vec<&GuessRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| compare_records(a, b));
        sorted
    }
}

fn compare_records(a: &GuessRecord, b: &GuessRecord) -> Ordering {
    b.count.cmp(&a.count).then(a.order.cmp(&b.order))
}

/// Resultado de um palpite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// Palpite normalizado (vazio se ignorado).
    pub word: String,
    pub matched_count: usize,
    /// `true` se criou um novo registro no histórico.
    pub recorded: bool,
}

impl GuessOutcome {
    fn ignored() -> Self {
        Self {
            word: String::new(),
            matched_count: 0,
            recorded: false,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.word.is_empty()
    }
}

/// Avalia um palpite: revela e destaca as palavras que casam e atualiza o histórico.
///
/// Palpites vazios (ou só espaços) não alteram nada, nem o destaque atual.
pub fn submit_guess(raw: &str, registry: &mut WordRegistry, history: &mut GuessHistory) -> GuessOutcome {
    let guess = normalize(raw);
    if guess.is_empty() {
        return GuessOutcome::ignored();
    }

    registry.clear_highlight();
    let key = key_for(&guess);

    let mut matched_count = 0;
    for entry in registry.entries_mut() {
        if matches_guess(&entry.normalized, &guess) {
            entry.revealed = true;
            entry.highlighted = true;
            matched_count += 1;
        }
    }

    let recorded = history.record(&guess, &key, matched_count);
    tracing::debug!("palpite {:?} (chave {:?}): {} palavras", guess, key, matched_count);

    GuessOutcome {
        word: guess,
        matched_count,
        recorded,
    }
}
