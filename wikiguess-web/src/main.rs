//! Servidor Axum do Wikiguess: partidas via HTTP e palpites via WebSocket

mod cache;
mod config;
mod error;
mod render;
mod sources;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wikiguess_core::{GameEvent, GameSession, GameView};

use crate::config::Config;
use crate::error::WebError;
use crate::sources::Sources;

/// Partidas guardadas ao mesmo tempo; a mais antiga sai primeiro.
const MAX_GAMES: usize = 1024;

/// Estado compartilhado da aplicação
struct AppState {
    sources: Sources,
    games: RwLock<HashMap<u64, GameSession>>,
    next_id: AtomicU64,
}

impl AppState {
    fn new(config: &Config) -> Self {
        Self {
            sources: Sources::new(config),
            games: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    async fn insert_game(&self, game: GameSession) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut games = self.games.write().await;
        if games.len() >= MAX_GAMES {
            if let Some(oldest) = games.keys().min().copied() {
                games.remove(&oldest);
            }
        }
        games.insert(id, game);
        id
    }
}

/// Corpo de `POST /api/games`. Sem `text`, sorteia um artigo da Wikipédia.
#[derive(Deserialize, Default)]
struct NewGameRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct GuessRequest {
    guess: String,
}

#[derive(Serialize)]
struct GameResponse {
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<GameEvent>,
    view: GameView,
    article_html: String,
}

impl GameResponse {
    fn build(id: u64, game: &GameSession, event: Option<GameEvent>) -> Result<Self, WebError> {
        Self::from_view(id, game.view(), event)
    }

    fn from_view(id: u64, view: GameView, event: Option<GameEvent>) -> Result<Self, WebError> {
        let article_html = render::article_html(&view)?;
        Ok(Self {
            id,
            event,
            view,
            article_html,
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(&config));
    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("não foi possível abrir {}: {}", config.bind, e);
            std::process::exit(1);
        }
    };
    info!("🚀 Servidor Wikiguess iniciado em http://{}", config.bind);
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("erro no servidor: {}", e);
        std::process::exit(1);
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/games", post(new_game_handler))
        .route("/api/games/:id", get(get_game_handler))
        .route("/api/games/:id/guess", post(guess_handler))
        .route("/api/games/:id/open", post(open_handler))
        .route("/api/games/:id/mask", post(mask_handler))
        .route("/api/games/:id/ws", get(ws_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Nova partida: texto enviado pelo cliente ou artigo sorteado da Wikipédia
async fn new_game_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<NewGameRequest>>,
) -> Result<Json<GameResponse>, WebError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let game = match req.text {
        Some(text) => {
            let stop_words = state.sources.load_stop_words().await;
            let title = req.title.unwrap_or_else(|| "Texto livre".to_string());
            GameSession::new(title, &text, Arc::new(stop_words))
        }
        None => {
            let (stop_words, article) = state.sources.random_article().await?;
            GameSession::new(article.title, &article.text, Arc::new(stop_words))
        }
    };

    let event = game.started_event();
    info!("nova partida: {:?}", event);
    let view = game.view();
    let id = state.insert_game(game).await;
    Ok(Json(GameResponse::from_view(id, view, Some(event))?))
}

async fn get_game_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, WebError> {
    let games = state.games.read().await;
    let game = games.get(&id).ok_or(WebError::GameNotFound(id))?;
    Ok(Json(GameResponse::build(id, game, None)?))
}

async fn guess_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<GameResponse>, WebError> {
    let mut games = state.games.write().await;
    let game = games.get_mut(&id).ok_or(WebError::GameNotFound(id))?;
    let event = game.guess(&req.guess);
    Ok(Json(GameResponse::build(id, game, Some(event))?))
}

/// "Abrir": revela o artigo inteiro
async fn open_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, WebError> {
    let mut games = state.games.write().await;
    let game = games.get_mut(&id).ok_or(WebError::GameNotFound(id))?;
    let event = game.open_all();
    Ok(Json(GameResponse::build(id, game, Some(event))?))
}

/// Volta a mascarar tudo, exceto as stop words
async fn mask_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, WebError> {
    let mut games = state.games.write().await;
    let game = games.get_mut(&id).ok_or(WebError::GameNotFound(id))?;
    game.remask();
    Ok(Json(GameResponse::build(id, game, None)?))
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Response {
    if !state.games.read().await.contains_key(&id) {
        return WebError::GameNotFound(id).into_response();
    }
    ws.on_upgrade(move |socket| handle_websocket(socket, state, id))
}

/// Cada mensagem de texto é um palpite; responde com `GameResponse` em JSON
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>, id: u64) {
    info!("WebSocket conectado à partida {}", id);

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Aceita {"guess": "..."} ou o palpite como texto puro
                let guess = serde_json::from_str::<GuessRequest>(&text)
                    .map(|req| req.guess)
                    .unwrap_or_else(|_| text.to_string());

                let payload = {
                    let mut games = state.games.write().await;
                    match games.get_mut(&id) {
                        Some(game) => {
                            let event = game.guess(&guess);
                            GameResponse::build(id, game, Some(event))
                                .map_err(|e| e.to_string())
                                .and_then(|r| serde_json::to_string(&r).map_err(|e| e.to_string()))
                        }
                        None => Err(WebError::GameNotFound(id).to_string()),
                    }
                };

                let json = payload.unwrap_or_else(|e| {
                    warn!("WebSocket: {}", e);
                    serde_json::json!({ "error": e }).to_string()
                });
                if socket.send(Message::Text(json.into())).await.is_err() {
                    return; // cliente desconectou
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
