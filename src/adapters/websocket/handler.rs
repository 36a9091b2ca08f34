//! WebSocket upgrade handler for live analytics connections.
//!
//! Handles the HTTP → WebSocket upgrade and the connection lifecycle:
//! join the form room, greet the client, forward invalidation signals,
//! answer pings, clean up room membership on disconnect.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::domain::foundation::{FormId, Timestamp};

use super::messages::{ClientMessage, ConnectedMessage, PongMessage, ServerMessage};
use super::rooms::{ClientId, RoomManager};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Room manager for form-based routing.
    pub room_manager: Arc<RoomManager>,
}

impl WebSocketState {
    /// Create a new WebSocket state.
    pub fn new(room_manager: Arc<RoomManager>) -> Self {
        Self { room_manager }
    }
}

/// Creates the WebSocket router.
///
/// Route: `GET /ws/forms/:id`
pub fn websocket_router(state: WebSocketState) -> Router {
    Router::new()
        .route("/ws/forms/:id", get(ws_handler))
        .with_state(state)
}

/// Handle WebSocket upgrade requests for a form's live dashboard.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(form_id): Path<String>,
    State(state): State<WebSocketState>,
) -> Response {
    let form_id: FormId = match form_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return Response::builder()
                .status(400)
                .body("Invalid form ID".into())
                .unwrap();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, form_id, state))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, form_id: FormId, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = ClientId::new();
    let mut room_rx = state.room_manager.join(&form_id, client_id.clone()).await;

    let connected = ServerMessage::Connected(ConnectedMessage {
        form_id: form_id.to_string(),
        client_id: client_id.to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
    });
    if send_message(&mut sender, &connected).await.is_err() {
        // Client disconnected immediately.
        state.room_manager.leave(&client_id).await;
        return;
    }

    tracing::debug!(form_id = %form_id, client_id = %client_id, "ws client connected");

    loop {
        tokio::select! {
            notice = room_rx.recv() => match notice {
                Ok(notice) => {
                    if send_message(&mut sender, &notice.to_server_message())
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                // Slow client missed buffered signals; it recovers on its
                // next re-fetch, so keep the connection.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(client_id = %client_id, skipped, "ws client lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if let Ok(ClientMessage::Ping) = serde_json::from_str(&text) {
                        let pong = ServerMessage::Pong(PongMessage {
                            timestamp: Timestamp::now().to_rfc3339(),
                        });
                        if send_message(&mut sender, &pong).await.is_err() {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(client_id = %client_id, "ws receive error: {}", e);
                    break;
                }
            },
        }
    }

    state.room_manager.leave(&client_id).await;
    tracing::debug!(form_id = %form_id, client_id = %client_id, "ws client disconnected");
}

async fn send_message(
    sender: &mut (impl SinkExt<Message> + Unpin),
    message: &ServerMessage,
) -> Result<(), ()> {
    let text = serde_json::to_string(message).map_err(|_| ())?;
    sender.send(Message::Text(text)).await.map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn websocket_router_compiles() {
        let state = WebSocketState::new(Arc::new(RoomManager::with_default_capacity()));
        let _router = websocket_router(state);
    }
}
