//! WebSocket endpoint that relays schedule events to a connected viewer.
//!
//! The server only ever writes; anything the viewer sends is ignored apart
//! from a close frame.

use std::sync::Arc;

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use studiosync_core::errors::ScheduleError;
use tracing::{debug, info, warn};

use crate::{ApiState, middleware::error_handling::AppError, notifier::ScheduleSubscription};

pub async fn schedule_live(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ApiState>>,
) -> Result<Response, AppError> {
    let notifier = state.service.notifier();

    // Subscribe before upgrading so the viewer hears every event published
    // after its handshake completes.
    let subscription = notifier.subscribe().ok_or_else(|| {
        ScheduleError::ViewerLimit(format!(
            "{} viewers already connected",
            notifier.max_subscribers()
        ))
    })?;

    info!(viewers = notifier.subscriber_count(), "viewer connected");
    Ok(ws.on_upgrade(move |socket| forward_events(socket, subscription)))
}

async fn forward_events(socket: WebSocket, mut subscription: ScheduleSubscription) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(error = %err, "failed to encode schedule event");
                        continue;
                    }
                };
                if sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    debug!("viewer disconnected");
}
