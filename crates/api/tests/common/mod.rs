#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use axum_test::TestServer;
use studiosync_api::{
    ApiState, middleware::auth::hash_password, notifier::ScheduleNotifier, router,
    service::ScheduleService,
};
use studiosync_core::models::{
    schedule::CreateTimeSlotRequest,
    time_slot::{ClassEntry, TimeSlot, WeekClasses},
};
use studiosync_db::{
    memory::InMemoryScheduleStore,
    store::{AdminStore, ScheduleStore},
};
use tokio::net::TcpListener;

pub const ADMIN_USERNAME: &str = "front-desk";
pub const ADMIN_PASSWORD: &str = "namaste-2024";

pub struct TestContext {
    pub store: Arc<InMemoryScheduleStore>,
    pub notifier: ScheduleNotifier,
    pub state: Arc<ApiState>,
    /// The single slot every context starts with
    pub slot: TimeSlot,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::build(16, false).await
    }

    /// Context whose write routes require [`ADMIN_USERNAME`] / [`ADMIN_PASSWORD`].
    pub async fn with_admin_gate() -> Self {
        Self::build(16, true).await
    }

    pub async fn with_max_viewers(max_viewers: usize) -> Self {
        Self::build(max_viewers, false).await
    }

    async fn build(max_viewers: usize, admin_gate: bool) -> Self {
        let store = Arc::new(InMemoryScheduleStore::new());
        let slot = store
            .insert(&morning_slot())
            .await
            .expect("seed slot");

        let admins = if admin_gate {
            let hash = hash_password(ADMIN_PASSWORD).expect("hash admin password");
            store.add_admin(ADMIN_USERNAME, &hash).await;
            let admins: Arc<dyn AdminStore> = store.clone();
            Some(admins)
        } else {
            None
        };

        let notifier = ScheduleNotifier::new(16, max_viewers);
        let schedules: Arc<dyn ScheduleStore> = store.clone();
        let service = ScheduleService::new(schedules, notifier.clone());
        let state = Arc::new(ApiState::new(service, admins));

        Self {
            store,
            notifier,
            state,
            slot,
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(router(Arc::clone(&self.state))).expect("test server")
    }

    /// Serves the router on an ephemeral local port.
    pub async fn spawn(&self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = router(Arc::clone(&self.state));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        addr
    }

    pub async fn stored(&self) -> TimeSlot {
        self.store
            .get(self.slot.id)
            .await
            .expect("store read")
            .expect("seed slot present")
    }
}

/// A week of Morning Hatha at the studio.
pub fn morning_slot() -> CreateTimeSlotRequest {
    CreateTimeSlotRequest {
        time_range: "06:00 AM - 07:00 AM".to_string(),
        classes_by_day: WeekClasses::every_day(ClassEntry::new(
            "Morning Hatha",
            "Studio",
            "Personal",
        )),
    }
}
