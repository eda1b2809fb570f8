//! Servidor web Axum com WebSocket para buscas KWIC no navegador

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use kwic_core::{
    corpus::demo_texts, ConcordanceResult, Concordancer, KwicError, PipelineEvent,
    SearchConfig, SearchValue,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Estado compartilhado da aplicação
struct AppState {
    concordancer: Concordancer,
}

/// Corpo de `POST /search` e das mensagens WebSocket.
///
/// Os modos chegam como texto e são validados antes de qualquer processamento.
#[derive(Deserialize)]
struct SearchRequest {
    text: String,
    query: SearchValue,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    rank: Option<String>,
    #[serde(default)]
    window: Option<usize>,
    #[serde(default)]
    chunker: Option<String>,
}

impl SearchRequest {
    fn config(&self) -> Result<SearchConfig, KwicError> {
        let defaults = SearchConfig::default();
        Ok(SearchConfig {
            mode: self.mode.as_deref().map(str::parse).transpose()?.unwrap_or(defaults.mode),
            rank: self.rank.as_deref().map(str::parse).transpose()?.unwrap_or(defaults.rank),
            window: self.window.unwrap_or(defaults.window),
            chunker: self
                .chunker
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or(defaults.chunker),
        })
    }
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<ConcordanceResult>,
    total_matches: usize,
    processing_ms: u64,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let state = Arc::new(AppState {
        concordancer: Concordancer::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/search", post(search_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .with_state(state);

    let addr = std::env::var("KWIC_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Servidor KWIC iniciado em http://{addr}");
    axum::serve(listener, app).await
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

fn bad_request(err: KwicError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": err.to_string()})),
    )
        .into_response()
}

/// Busca KWIC via HTTP POST (sem streaming)
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Response {
    let config = match req.config() {
        Ok(config) => config,
        Err(err) => {
            warn!("requisição inválida: {err}");
            return bad_request(err);
        }
    };

    let start = Instant::now();
    let results = state
        .concordancer
        .search_with_config(&req.text, req.query.clone(), &config);

    Json(SearchResponse {
        total_matches: results.len(),
        results,
        processing_ms: start.elapsed().as_millis() as u64,
    })
    .into_response()
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(domain, text)| {
            serde_json::json!({
                "domain": domain,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe uma busca, executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let parsed = serde_json::from_str::<SearchRequest>(&text)
                    .map_err(|e| e.to_string())
                    .and_then(|req| req.config().map(|c| (req, c)).map_err(|e| e.to_string()));

                let (req, config) = match parsed {
                    Ok(ok) => ok,
                    Err(message) => {
                        let error = serde_json::json!({"type": "Error", "data": {"message": message}});
                        if socket.send(Message::Text(error.to_string())).await.is_err() {
                            return;
                        }
                        continue;
                    }
                };

                info!(
                    "Buscando via WebSocket [{} | {} | janela {}]: {} bytes",
                    config.mode,
                    config.rank,
                    config.window,
                    req.text.len()
                );

                // O pipeline é síncrono: roda fora do runtime
                let (tx_std, rx_std) = std::sync::mpsc::channel::<PipelineEvent>();
                let state_for_thread = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    state_for_thread
                        .concordancer
                        .stream_with_config(&req.text, req.query, &config, tx_std);
                });
                handle.await.ok();

                let events: Vec<PipelineEvent> = rx_std.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"text": "a b", "query": "a"}"#).unwrap();
        assert_eq!(req.config().unwrap(), SearchConfig::default());
    }

    #[test]
    fn test_request_with_sequence_and_modes() {
        let req: SearchRequest = serde_json::from_str(
            r#"{"text": "a b", "query": ["NNP", "CC"], "mode": "pos", "rank": "frequency", "window": 3, "chunker": "heuristic"}"#,
        )
        .unwrap();
        let config = req.config().unwrap();
        assert_eq!(config.mode, kwic_core::SearchMode::Pos);
        assert_eq!(config.rank, kwic_core::RankMode::Frequency);
        assert_eq!(config.window, 3);
        assert_eq!(config.chunker, kwic_core::ChunkerMode::Heuristic);
    }

    #[test]
    fn test_request_invalid_mode() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"text": "a", "query": "a", "mode": "fuzzy"}"#).unwrap();
        assert!(matches!(req.config(), Err(KwicError::InvalidArgument { .. })));
    }
}
