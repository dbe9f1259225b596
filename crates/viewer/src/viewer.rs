//! # Schedule Viewer
//!
//! Keeps a displayable copy of the schedule in sync with the server. The
//! viewer fetches once when mounted and again on every live event, replacing
//! its whole copy each time.
//!
//! A failed fetch never empties the display: the viewer keeps the last
//! schedule it loaded, or shows the studio's default week if it has never
//! loaded one. There is no retry beyond that; the next event triggers the
//! next attempt.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use studiosync_core::models::{
    defaults::placeholder_schedule, event::ScheduleEvent, time_slot::TimeSlot,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::source::ScheduleSource;

/// Where the displayed schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOrigin {
    /// The most recent fetch succeeded.
    Live,
    /// The most recent fetch failed; showing the last successful one.
    LastKnownGood,
    /// Nothing has loaded yet; showing the built-in default week.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSnapshot {
    pub slots: Vec<TimeSlot>,
    pub origin: ScheduleOrigin,
}

impl ScheduleSnapshot {
    fn placeholder() -> Self {
        Self {
            slots: placeholder_schedule(),
            origin: ScheduleOrigin::Placeholder,
        }
    }
}

#[derive(Clone)]
pub struct ScheduleViewer {
    source: Arc<dyn ScheduleSource>,
    snapshot: Arc<watch::Sender<ScheduleSnapshot>>,
}

impl ScheduleViewer {
    pub fn new(source: Arc<dyn ScheduleSource>) -> Self {
        let (snapshot, _) = watch::channel(ScheduleSnapshot::placeholder());
        Self {
            source,
            snapshot: Arc::new(snapshot),
        }
    }

    /// What should be on screen right now.
    pub fn snapshot(&self) -> ScheduleSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receives every re-render, starting after the current one.
    pub fn subscribe(&self) -> watch::Receiver<ScheduleSnapshot> {
        self.snapshot.subscribe()
    }

    /// Refetches the whole schedule and replaces the displayed copy.
    pub async fn refresh(&self) -> ScheduleOrigin {
        match self.source.fetch_schedule().await {
            Ok(slots) => {
                debug!(slots = slots.len(), "schedule refreshed");
                self.snapshot.send_replace(ScheduleSnapshot {
                    slots,
                    origin: ScheduleOrigin::Live,
                });
                ScheduleOrigin::Live
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch schedule, keeping previous copy");
                let mut origin = ScheduleOrigin::Placeholder;
                self.snapshot.send_modify(|current| {
                    if current.origin != ScheduleOrigin::Placeholder {
                        current.origin = ScheduleOrigin::LastKnownGood;
                    }
                    origin = current.origin;
                });
                origin
            }
        }
    }

    /// Loads the schedule, then refetches on every event from `events` until
    /// the stream ends or the returned handle is unmounted.
    ///
    /// `events` should already be subscribed so nothing published during the
    /// initial fetch is missed.
    pub async fn mount<S>(&self, events: S) -> ViewerHandle
    where
        S: Stream<Item = ScheduleEvent> + Send + Unpin + 'static,
    {
        let origin = self.refresh().await;
        info!(?origin, "schedule viewer mounted");

        let viewer = self.clone();
        let mut events = events;
        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                debug!(event = event.name(), "schedule change announced");
                viewer.refresh().await;
            }
            info!("live channel closed, schedule will no longer update");
        });

        ViewerHandle { task: Some(task) }
    }
}

/// A mounted viewer. Dropping the handle also stops updates.
pub struct ViewerHandle {
    task: Option<JoinHandle<()>>,
}

impl ViewerHandle {
    /// Stops listening for events and drops the event stream.
    pub async fn unmount(mut self) {
        let Some(task) = self.task.take() else { return };
        task.abort();
        if let Err(err) = task.await {
            if !err.is_cancelled() {
                warn!(error = %err, "viewer task failed");
            }
        }
        debug!("schedule viewer unmounted");
    }

    /// True once the event stream has ended or the viewer was unmounted.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for ViewerHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
