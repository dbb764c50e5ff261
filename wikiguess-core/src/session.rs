//! # Sessão de Jogo — Controlador
//!
//! Uma [`GameSession`] é dona de todo o estado mutável de uma partida
//! (registro de palavras, histórico, modo aberto/mascarado). Uma nova partida
//! constrói uma nova sessão; nada é reiniciado no lugar.
//!
//! Cada ação devolve um [`GameEvent`] serializável, que o servidor web envia
//! ao navegador (HTTP ou WebSocket).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use std::sync::Arc;
//! use wikiguess_core::{GameSession, StopWordSet};
//!
//! let stop_words = Arc::new(StopWordSet::from_raw(["сидит"]));
//! let mut game = GameSession::new("Кошки", "Кошка сидит. Кошка спит.", stop_words);
//!
//! game.guess("кошка");
//! assert_eq!(game.registry().render_plain(), "Кошка сидит. Кошка □□□□.");
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::guess::{submit_guess, GuessHistory, GuessOutcome};
use crate::registry::{DisplayItem, WordRegistry};
use crate::stopwords::StopWordSet;

/// Eventos emitidos pela sessão.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum GameEvent {
    /// Artigo carregado e mascarado.
    GameStarted {
        title: String,
        total_words: usize,
        revealed_words: usize,
    },
    /// Palpite avaliado.
    GuessApplied {
        word: String,
        matched_count: usize,
        recorded: bool,
    },
    /// Palpite vazio, nada mudou.
    GuessIgnored,
    /// "Abrir tudo" executado.
    ArticleOpened { total_words: usize },
}

/// Linha do histórico para exibição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub word: String,
    pub count: usize,
}

/// Um trecho do artigo para exibição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewUnit {
    Text { text: String },
    Word { id: usize, text: String, revealed: bool, highlighted: bool },
}

/// Fotografia serializável do estado da partida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub title: String,
    pub opened: bool,
    pub total_words: usize,
    pub revealed_words: usize,
    pub last_guess: Option<HistoryRow>,
    pub history: Vec<HistoryRow>,
    pub units: Vec<ViewUnit>,
}

/// Estado de uma partida.
#[derive(Debug, Clone)]
pub struct GameSession {
    title: String,
    registry: WordRegistry,
    history: GuessHistory,
    stop_words: Arc<StopWordSet>,
    opened: bool,
    last_guess: Option<GuessOutcome>,
}

impl GameSession {
    /// Mascara o texto e revela as stop words.
    pub fn new(title: impl Into<String>, text: &str, stop_words: Arc<StopWordSet>) -> Self {
        let registry = WordRegistry::build(text, &stop_words);
        Self {
            title: title.into(),
            registry,
            history: GuessHistory::new(),
            stop_words,
            opened: false,
            last_guess: None,
        }
    }

    /// Evento de início, para o cliente.
    pub fn started_event(&self) -> GameEvent {
        GameEvent::GameStarted {
            title: self.title.clone(),
            total_words: self.registry.len(),
            revealed_words: self.registry.revealed_count(),
        }
    }

    pub fn guess(&mut self, raw: &str) -> GameEvent {
        let outcome = submit_guess(raw, &mut self.registry, &mut self.history);
        if outcome.is_ignored() {
            return GameEvent::GuessIgnored;
        }
        let event = GameEvent::GuessApplied {
            word: outcome.word.clone(),
            matched_count: outcome.matched_count,
            recorded: outcome.recorded,
        };
        self.last_guess = Some(outcome);
        event
    }

    /// Revela todas as palavras.
    pub fn open_all(&mut self) -> GameEvent {
        self.opened = true;
        self.registry.open_all(&self.stop_words);
        GameEvent::ArticleOpened {
            total_words: self.registry.len(),
        }
    }

    /// Volta ao modo mascarado; apenas stop words ficam visíveis.
    pub fn remask(&mut self) {
        self.opened = false;
        self.registry.set_masked_mode(true, &self.stop_words);
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn registry(&self) -> &WordRegistry {
        &self.registry
    }

    pub fn history(&self) -> &GuessHistory {
        &self.history
    }

    pub fn last_guess(&self) -> Option<&GuessOutcome> {
        self.last_guess.as_ref()
    }

    pub fn view(&self) -> GameView {
        let units = self
            .registry
            .display()
            .map(|item| match item {
                DisplayItem::Text(text) => ViewUnit::Text { text: text.to_string() },
                DisplayItem::Word { id, text, revealed, highlighted } => ViewUnit::Word {
                    id,
                    text: text.to_string(),
                    revealed,
                    highlighted,
                },
            })
            .collect();

        GameView {
            title: self.title.clone(),
            opened: self.opened,
            total_words: self.registry.len(),
            revealed_words: self.registry.revealed_count(),
            last_guess: self.last_guess.as_ref().map(|g| HistoryRow {
                word: g.word.clone(),
                count: g.matched_count,
            }),
            history: self
                .history
                .sorted()
                .into_iter()
                .map(|r| HistoryRow { word: r.word.clone(), count: r.count })
                .collect(),
            units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(text: &str, stop: &[&str]) -> GameSession {
        GameSession::new("Тест", text, Arc::new(StopWordSet::from_raw(stop)))
    }

    #[test]
    fn test_started_event() {
        let game = session("Кошка сидит. Кошка спит.", &["сидит"]);
        assert_eq!(
            game.started_event(),
            GameEvent::GameStarted {
                title: "Тест".to_string(),
                total_words: 4,
                revealed_words: 1,
            }
        );
    }

    #[test]
    fn test_guess_events() {
        let mut game = session("Кошка сидит. Кошка спит.", &["сидит"]);
        assert_eq!(game.guess("  "), GameEvent::GuessIgnored);
        assert!(game.last_guess().is_none());

        assert_eq!(
            game.guess("кошка"),
            GameEvent::GuessApplied {
                word: "кошка".to_string(),
                matched_count: 2,
                recorded: true,
            }
        );
        assert_eq!(game.last_guess().unwrap().matched_count, 2);
    }

    #[test]
    fn test_open_and_remask() {
        let mut game = session("кот и пёс", &["и"]);
        game.open_all();
        assert!(game.is_opened());
        assert_eq!(game.registry().render_plain(), "кот и пёс");

        game.remask();
        assert!(!game.is_opened());
        assert_eq!(game.registry().render_plain(), "□□□ и □□□");
    }

    #[test]
    fn test_view_history_sorted() {
        let mut game = session("кот кот пёс", &[]);
        game.guess("пёс");
        game.guess("кот");
        game.guess("мышь");

        let view = game.view();
        let rows: Vec<(&str, usize)> = view.history.iter().map(|r| (r.word.as_str(), r.count)).collect();
        assert_eq!(rows, [("кот", 2), ("пес", 1), ("мышь", 0)]);
        assert_eq!(view.last_guess, Some(HistoryRow { word: "мышь".to_string(), count: 0 }));
        assert_eq!(view.units.len(), 5);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(GameEvent::GuessApplied {
            word: "кот".to_string(),
            matched_count: 1,
            recorded: true,
        })
        .unwrap();
        assert_eq!(json["type"], "GuessApplied");
        assert_eq!(json["data"]["matched_count"], 1);
    }

    #[test]
    fn test_empty_article() {
        let game = session("", &[]);
        let view = game.view();
        assert_eq!(view.total_words, 0);
        assert!(view.units.is_empty());
    }
}
