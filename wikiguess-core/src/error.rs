//! Tipos de erro do núcleo do jogo.

use thiserror::Error;

/// Erros do núcleo. O motor de mascaramento em si não falha; os erros vêm
/// das listas externas (artigos) antes de uma partida começar.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Nenhuma URL válida da Wikipédia russa na lista de artigos.
    #[error("lista de artigos vazia ou inválida")]
    EmptyArticleList,

    /// A URL não contém um título `/wiki/<título>`.
    #[error("URL de artigo não reconhecida: {0}")]
    InvalidArticleUrl(String),
}

/// `Result` com o [`CoreError`] do crate.
pub type Result<T> = std::result::Result<T, CoreError>;
