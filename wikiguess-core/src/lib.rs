//! # wikiguess-core — Motor do Jogo de Adivinhação de Palavras
//!
//! Um artigo da Wikipédia tem todas as letras e dígitos trocados por `□`;
//! pontuação e stop words continuam visíveis. O jogador revela palavras
//! adivinhando um prefixo de 5 caracteres.
//!
//! ## Arquitetura
//!
//! O dado flui em etapas, das folhas para o controlador:
//!
//! 1.  **Normalização** ([`normalizer`]): remove acentos tônicos, minúsculas, `ё` → `е`.
//! 2.  **Classificação** ([`classifier`]): letra/dígito Unicode vs separador.
//! 3.  **Tokenização** ([`tokenizer`]): palavras e separadores, sem perder nada.
//! 4.  **Máscara** ([`masker`]): `Кошка` → `□□□□□`.
//! 5.  **Registro** ([`registry`]): uma entrada por palavra, com estado revelado.
//! 6.  **Palpites** ([`guess`]): casamento por prefixo e histórico deduplicado.
//! 7.  **Sessão** ([`session`]): dona do estado de uma partida.
//!
//! Busca de listas e do artigo fica fora do núcleo; [`lists`] apenas interpreta
//! o texto das listas.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use std::sync::Arc;
//! use wikiguess_core::{GameEvent, GameSession, StopWordSet};
//!
//! let stop_words = Arc::new(StopWordSet::fallback());
//! let mut game = GameSession::new("Шахматы", "Шахматы — настольная игра.", stop_words);
//!
//! match game.guess("шахматист") {
//!     GameEvent::GuessApplied { matched_count, .. } => assert_eq!(matched_count, 1),
//!     other => panic!("evento inesperado: {:?}", other),
//! }
//! ```

pub mod classifier;
pub mod error;
pub mod guess;
pub mod lists;
pub mod masker;
pub mod normalizer;
pub mod registry;
pub mod session;
pub mod stopwords;
pub mod tokenizer;

pub use error::{CoreError, Result};
pub use guess::{submit_guess, GuessHistory, GuessOutcome, GuessRecord};
pub use lists::{parse_csv_list, title_from_url, ArticleList};
pub use normalizer::normalize;
pub use registry::{key_for, DisplayItem, DisplayUnit, WordEntry, WordRegistry};
pub use session::{GameEvent, GameSession, GameView, HistoryRow, ViewUnit};
pub use stopwords::StopWordSet;
pub use tokenizer::{tokenize, Token, TokenKind};
