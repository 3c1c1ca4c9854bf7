//! WebSocket recomposition handlers
//!
//! Each connection holds its own control snapshot; partial `controls`
//! messages are applied on top of it. Nothing is shared between connections
//! except the read-only dataset.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use citydash::prelude::{UiState, recompose};
use futures::{Sink, SinkExt, StreamExt};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::AppState;
use crate::error::ServerError;
use crate::models::{ClientMessage, ServerMessage};

/// Per-connection control state
pub struct Connection {
    pub id: Uuid,
    ui: UiState,
    seq: u64,
}

impl Connection {
    pub fn new(state: &AppState) -> Self {
        Self {
            id: Uuid::new_v4(),
            ui: state.variant.default_state(),
            seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Handle one text frame and produce the reply.
    pub fn handle(&mut self, state: &AppState, text: &str) -> ServerMessage {
        let seq = self.next_seq();
        match self.apply(state, text) {
            Ok(()) => ServerMessage::Composition {
                seq,
                composition: recompose(&state.dataset, state.variant, &self.ui),
            },
            Err(e) => {
                warn!("Connection {}: {}", self.id, e);
                ServerMessage::Error {
                    seq,
                    message: e.to_string(),
                }
            }
        }
    }

    fn apply(&mut self, state: &AppState, text: &str) -> Result<(), ServerError> {
        match serde_json::from_str::<ClientMessage>(text)? {
            ClientMessage::Controls { state: controls } => {
                self.ui = controls.apply_to(self.ui.clone())?;
            }
            ClientMessage::Reset => {
                debug!("Connection {} reset to defaults", self.id);
                self.ui = state.variant.default_state();
            }
        }
        Ok(())
    }
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Send the `connected` greeting; `false` means the socket is already gone.
async fn send_connected<S>(sender: &mut S, conn: &Connection) -> bool
where
    S: Sink<Message> + Unpin,
{
    let connected_msg = ServerMessage::Connected {
        seq: 0,
        connection_id: conn.id.to_string(),
    };
    match serde_json::to_string(&connected_msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            error!("Failed to serialize connected message: {}", e);
            false
        }
    }
}

/// Handle a WebSocket connection
async fn handle_socket(state: Arc<AppState>, socket: WebSocket) {
    let mut conn = Connection::new(&state);
    info!("WebSocket connected: {}", conn.id);

    let (mut sender, mut receiver) = socket.split();

    if !send_connected(&mut sender, &conn).await {
        warn!("WebSocket {} closed before the connected message", conn.id);
        return;
    }

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let reply = conn.handle(&state, text.as_str());
                match serde_json::to_string(&reply) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Failed to serialize message: {}", e);
                    }
                }
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    info!("WebSocket disconnected: {}", conn.id);
}
