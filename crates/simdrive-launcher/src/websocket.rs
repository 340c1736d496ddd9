//! WebSocket endpoint for display surfaces.
//!
//! The primary surface drives the wizard: it sends [`WizardEvent`] JSON and
//! gets a [`WizardView`] back after every event. Every surface, primary
//! included, receives status notices as they are broadcast. Input from
//! auxiliary surfaces is ignored.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use simdrive_core::{WizardEvent, WizardView};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::helpers::apply_effect;
use crate::presentation::{StatusNotice, SurfaceRole};
use crate::state::{AppState, SurfaceQuery};

/// Messages sent to a display surface.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceMessage {
    View(WizardView),
    Status(StatusNotice),
    Error { message: String },
}

/// Axum handler for WebSocket upgrade at `/ws?surface=<role>`.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(query): Query<SurfaceQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_surface(socket, state, query.surface))
}

/// Serves one display surface until either side closes.
///
/// Three loops race under `tokio::select!`: an outbound loop draining an
/// mpsc queue into the socket, a notice loop forwarding the status
/// broadcast, and an inbound loop applying wizard events.
pub async fn serve_surface(websocket: WebSocket, state: AppState, role: SurfaceRole) {
    info!("Display surface connected: {:?}", role);
    state.session.attach(role);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let (tx, mut rx) = mpsc::channel::<SurfaceMessage>(32);
    let mut notices = state.session.subscribe();

    let greeting = if role == SurfaceRole::Primary {
        SurfaceMessage::View(state.session.view().await)
    } else {
        SurfaceMessage::Status(StatusNotice {
            text: state.session.view().await.status,
        })
    };
    // Channel is fresh; this cannot fail.
    let _ = tx.send(greeting).await;

    let send_loop = async {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(err) => {
                    warn!("Failed to serialize surface message: {err}");
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text)).await.is_err() {
                debug!("WebSocket sender closed");
                break;
            }
        }
    };

    let notice_tx = tx.clone();
    let notice_loop = async move {
        loop {
            match notices.recv().await {
                Ok(notice) => {
                    if notice_tx.send(SurfaceMessage::Status(notice)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!("Surface {:?} skipped {skipped} status notices", role);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    let inbound_state = state.clone();
    let inbound = async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if role != SurfaceRole::Primary {
                        debug!("Ignoring input from {:?} surface", role);
                        continue;
                    }
                    let event: WizardEvent = match serde_json::from_str(&text) {
                        Ok(event) => event,
                        Err(err) => {
                            warn!("Invalid wizard event: {err}");
                            let message = SurfaceMessage::Error {
                                message: format!("invalid event: {err}"),
                            };
                            if tx.send(message).await.is_err() {
                                break;
                            }
                            continue;
                        }
                    };
                    debug!("Wizard event: {:?}", event);

                    let (view, effect) = inbound_state.session.handle_event(event).await;
                    apply_effect(&inbound_state, effect);
                    if tx.send(SurfaceMessage::View(view)).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) => {
                    info!("Display surface {:?} closed connection", role);
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("WebSocket receive error: {err}");
                    break;
                }
            }
        }
    };

    tokio::select! {
        _ = send_loop => {},
        _ = notice_loop => {},
        _ = inbound => {},
    }

    state.session.detach(role);
    info!("Display surface disconnected: {:?}", role);
}
