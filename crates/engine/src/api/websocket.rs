//! WebSocket relay for collaborative editing.
//!
//! Editors join adventure rooms and the relay forwards content and cursor
//! updates to the other members. Delivery is best-effort.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use advforge_shared::{RelayClientMessage, RelayServerMessage, ANONYMOUS_USER};

use super::connections::ConnectionManager;
use crate::app::App;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub app: Arc<App>,
    pub connections: Arc<ConnectionManager>,
}

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = Uuid::new_v4();
    let user_id = connection_id.to_string();

    let (tx, mut rx) = mpsc::channel::<RelayServerMessage>(CONNECTION_CHANNEL_BUFFER);
    state
        .connections
        .register(connection_id, user_id.clone(), tx.clone())
        .await;

    tracing::info!(connection_id = %connection_id, "Relay connection established");

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<RelayClientMessage>(&text) {
                Ok(msg) => handle_message(msg, &state, connection_id, &user_id).await,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        error = %e,
                        "Failed to parse relay message"
                    );
                    let _ = tx.try_send(RelayServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    });
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "Relay connection closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    state.connections.unregister(connection_id).await;
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "Relay connection terminated");
}

async fn handle_message(
    msg: RelayClientMessage,
    state: &WsState,
    connection_id: Uuid,
    user_id: &str,
) {
    let adventure_id = msg.adventure_id().to_string();
    let relayed = match relay_message(msg, user_id, &state.app) {
        Relay::Join => {
            if let Err(e) = state
                .connections
                .join_adventure(connection_id, &adventure_id)
                .await
            {
                tracing::warn!(connection_id = %connection_id, error = %e, "Join failed");
            }
            return;
        }
        Relay::Leave => {
            state.connections.leave_adventure(connection_id, &adventure_id);
            return;
        }
        Relay::Broadcast(relayed) => relayed,
    };

    state
        .connections
        .broadcast_to_adventure(&adventure_id, connection_id, relayed)
        .await;
}

#[derive(Debug, PartialEq)]
enum Relay {
    Join,
    Leave,
    Broadcast(RelayServerMessage),
}

/// What to do with one client message.
fn relay_message(msg: RelayClientMessage, user_id: &str, app: &App) -> Relay {
    match msg {
        RelayClientMessage::JoinAdventure { .. } => Relay::Join,
        RelayClientMessage::LeaveAdventure { .. } => Relay::Leave,
        RelayClientMessage::ContentChange { content, .. } => {
            Relay::Broadcast(RelayServerMessage::ContentChange {
                content,
                user_id: user_id.to_string(),
                timestamp: app.clock.now().to_rfc3339(),
            })
        }
        RelayClientMessage::CursorPosition {
            position,
            user_name,
            ..
        } => Relay::Broadcast(RelayServerMessage::CursorPosition {
            position,
            user_id: user_id.to_string(),
            user_name: user_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        }),
    }
}
