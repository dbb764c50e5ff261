//! Erros do servidor web e sua conversão em respostas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use wikiguess_core::CoreError;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("partida {0} não encontrada")]
    GameNotFound(u64),

    #[error("falha ao buscar {what}: {source}")]
    Fetch {
        what: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("artigo sem texto: {0}")]
    EmptyArticle(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("falha ao renderizar: {0}")]
    Render(#[from] askama::Error),

    #[error("configuração inválida: {0}")]
    Config(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::GameNotFound(_) => StatusCode::NOT_FOUND,
            // Erros do núcleo vêm das listas externas
            WebError::Fetch { .. } | WebError::EmptyArticle(_) | WebError::Core(_) => {
                StatusCode::BAD_GATEWAY
            }
            WebError::Render(_) | WebError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
