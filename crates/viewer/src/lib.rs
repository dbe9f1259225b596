//! # StudioSync Viewer
//!
//! Client that mirrors the studio's weekly schedule: it loads the schedule
//! from the API, listens on the live channel, and refetches whenever the
//! server announces a change.

use std::sync::Arc;

use eyre::Result;
use futures::{StreamExt, stream};
use studiosync_core::models::event::ScheduleEvent;
use tracing::{info, warn};

pub mod config;
pub mod live;
pub mod mock;
pub mod render;
pub mod source;
pub mod viewer;

use crate::{
    config::ViewerConfig,
    source::HttpScheduleSource,
    viewer::{ScheduleSnapshot, ScheduleViewer},
};

/// Runs a viewer against the configured API, handing every snapshot to
/// `on_render` (the first one right after mounting) until Ctrl-C.
///
/// If the live channel cannot be opened the viewer still shows what it could
/// load but will not update.
pub async fn run_viewer<F>(config: ViewerConfig, mut on_render: F) -> Result<()>
where
    F: FnMut(&ScheduleSnapshot),
{
    info!(api = %config.api_base_url, "starting schedule viewer");

    let events = match live::connect_events(&config).await {
        Ok(events) => events,
        Err(err) => {
            warn!(error = %err, "live updates unavailable");
            stream::empty::<ScheduleEvent>().boxed()
        }
    };

    let viewer = ScheduleViewer::new(Arc::new(HttpScheduleSource::new(&config)));
    let handle = viewer.mount(events).await;
    let mut changes = viewer.subscribe();
    on_render(&viewer.snapshot());

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = changes.borrow_and_update().clone();
                on_render(&snapshot);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.unmount().await;
    Ok(())
}
