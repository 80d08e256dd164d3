use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use common::config::GameConfig;
use common::games::snake::{ControlToken, RunStatus, SessionError, SnakeGameManager};
use common::render::ANIMATION_FILE_NAME;
use common::{ChannelId, GameMessageId, MessageId, log};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::message_board::MessageBoard;

#[derive(Clone)]
pub struct WebServerState {
    pub manager: SnakeGameManager<MessageBoard>,
    pub board: MessageBoard,
}

impl WebServerState {
    pub fn new(config: GameConfig) -> Self {
        let board = MessageBoard::new();
        Self {
            manager: SnakeGameManager::new(config, board.clone()),
            board,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ControlView {
    pub id: &'static str,
    pub label: &'static str,
}

impl From<ControlToken> for ControlView {
    fn from(token: ControlToken) -> Self {
        Self {
            id: token.id(),
            label: token.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StartGameResponse {
    pub content: String,
    pub channel_id: u64,
    pub message_id: u64,
    pub controls: Vec<Vec<ControlView>>,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct PressResponse {
    pub ticks_played: usize,
    pub frames: usize,
    pub status: &'static str,
    pub facing: String,
    pub published: bool,
}

#[derive(Debug)]
pub enum ApiError {
    Session(SessionError),
    ImageNotFound(GameMessageId),
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError::Session(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Session(SessionError::UnrecognizedControl(_)) => StatusCode::BAD_REQUEST,
            ApiError::Session(SessionError::SessionNotFound(_)) | ApiError::ImageNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Session(SessionError::Publish(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Session(SessionError::Animation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match self {
            ApiError::Session(e) => e.to_string(),
            ApiError::ImageNotFound(id) => format!("No image for message {}", id),
        };
        (status, message).into_response()
    }
}

fn status_name(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Running => "running",
        RunStatus::Lost => "lost",
        RunStatus::Won => "won",
    }
}

fn image_url(id: &GameMessageId) -> String {
    format!(
        "/channels/{}/messages/{}/{}",
        id.channel_id, id.message_id, ANIMATION_FILE_NAME
    )
}

pub fn router(state: WebServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/channels/{channel_id}/games", post(start_game))
        .route(
            "/channels/{channel_id}/messages/{message_id}/buttons/{token}",
            post(press_button),
        )
        .route(
            "/channels/{channel_id}/messages/{message_id}/game.gif",
            get(game_image),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(state: WebServerState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!("Web server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log!("Failed to listen for Ctrl+C: {}", e);
            }
            log!("Shutdown signal received");
        })
        .await
}

pub async fn start_game(
    State(state): State<WebServerState>,
    Path(channel_id): Path<u64>,
) -> Result<(StatusCode, Json<StartGameResponse>), ApiError> {
    let id = state
        .manager
        .start_game(ChannelId::new(channel_id), Utc::now())
        .await?;

    let stored = state.board.get(&id).await.ok_or(ApiError::ImageNotFound(id))?;
    let controls = stored
        .controls
        .iter()
        .map(|row| row.iter().copied().map(ControlView::from).collect())
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(StartGameResponse {
            content: stored.content,
            channel_id: id.channel_id.get(),
            message_id: id.message_id.get(),
            controls,
            image_url: image_url(&id),
        }),
    ))
}

pub async fn press_button(
    State(state): State<WebServerState>,
    Path((channel_id, message_id, token)): Path<(u64, u64, String)>,
) -> Result<Json<PressResponse>, ApiError> {
    let id = GameMessageId::new(ChannelId::new(channel_id), MessageId::new(message_id));
    let summary = state.manager.press_button(&id, &token, Utc::now()).await?;

    Ok(Json(PressResponse {
        ticks_played: summary.ticks_played,
        frames: summary.frames,
        status: status_name(summary.status),
        facing: format!("{:?}", summary.facing).to_lowercase(),
        published: summary.published,
    }))
}

pub async fn game_image(
    State(state): State<WebServerState>,
    Path((channel_id, message_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, ApiError> {
    let id = GameMessageId::new(ChannelId::new(channel_id), MessageId::new(message_id));
    let stored = state.board.get(&id).await.ok_or(ApiError::ImageNotFound(id))?;
    let headers = [
        (header::CONTENT_TYPE, "image/gif".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", stored.file_name),
        ),
        (header::ETAG, format!("\"{}\"", stored.revision)),
    ];
    Ok((headers, stored.animation))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn start(state: &WebServerState, channel_id: u64) -> StartGameResponse {
        let (status, Json(body)) = start_game(State(state.clone()), Path(channel_id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_start_returns_ids_and_layout() {
        let state = WebServerState::new(GameConfig::default());
        let body = start(&state, 12).await;

        assert_eq!(body.content, "Game");
        assert_eq!(body.channel_id, 12);
        assert_eq!(body.controls.len(), 3);
        assert!(body.controls.iter().all(|row| row.len() == 3));
        assert_eq!(body.controls[0][1].id, "up");
        assert_eq!(
            body.image_url,
            format!("/channels/12/messages/{}/game.gif", body.message_id)
        );
    }

    #[tokio::test]
    async fn test_press_then_fetch_image() {
        let state = WebServerState::new(GameConfig::default());
        let body = start(&state, 1).await;

        let Json(pressed) = press_button(
            State(state.clone()),
            Path((1, body.message_id, "down".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(pressed.facing, "down");
        assert!(pressed.published);

        let response = game_image(State(state.clone()), Path((1, body.message_id)))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/gif");
        assert_eq!(response.headers()[header::ETAG], "\"1\"");
    }

    #[tokio::test]
    async fn test_unknown_token_is_bad_request() {
        let state = WebServerState::new(GameConfig::default());
        let body = start(&state, 1).await;

        let error = press_button(
            State(state.clone()),
            Path((1, body.message_id, "jump".to_string())),
        )
        .await
        .unwrap_err();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_game_is_not_found() {
        let state = WebServerState::new(GameConfig::default());

        let error = press_button(State(state.clone()), Path((1, 404, "up".to_string())))
            .await
            .unwrap_err();
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);

        let error = game_image(State(state), Path((1, 404))).await.err().unwrap();
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
