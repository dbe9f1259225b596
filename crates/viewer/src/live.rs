//! Client side of the live channel.

use eyre::{Result, WrapErr};
use futures::{StreamExt, stream::BoxStream};
use studiosync_core::models::event::ScheduleEvent;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{info, warn};

use crate::config::ViewerConfig;

/// Connects to the live channel and yields every schedule event the server
/// sends. The stream ends when the connection closes.
pub async fn connect_events(config: &ViewerConfig) -> Result<BoxStream<'static, ScheduleEvent>> {
    let url = config.live_url()?;
    let (ws_stream, _) = connect_async(&url)
        .await
        .wrap_err_with(|| format!("failed to connect websocket: {}", url))?;
    info!(url = %url, "subscribed to schedule updates");

    let events = ws_stream.filter_map(|frame| async move {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ScheduleEvent>(&text) {
                Ok(event) => Some(event),
                Err(err) => {
                    warn!(error = %err, frame = %text, "ignoring unrecognised live frame");
                    None
                }
            },
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "live channel failed");
                None
            }
        }
    });

    Ok(events.boxed())
}
