mod common;

use std::{sync::Arc, time::Duration};

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use base64::{Engine, engine::general_purpose::STANDARD};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use studiosync_api::{
    ApiState,
    notifier::{ScheduleNotifier, ScheduleSubscription},
    router,
    service::ScheduleService,
};
use studiosync_core::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        event::ScheduleEvent,
        schedule::CreateTimeSlotRequest,
        time_slot::{ClassEntry, DayOfWeek, TimeSlot},
    },
};
use studiosync_db::{
    mock::{MockAdminStore, MockScheduleStore},
    store::{AdminStore, ScheduleStore},
};
use uuid::Uuid;

use common::{ADMIN_PASSWORD, ADMIN_USERNAME, TestContext};

async fn assert_no_event(subscription: &mut ScheduleSubscription) {
    let next = tokio::time::timeout(Duration::from_millis(50), subscription.recv()).await;
    assert!(next.is_err(), "unexpected event: {:?}", next);
}

fn basic_auth(username: &str, password: &str) -> (HeaderName, HeaderValue) {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    let value = HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap();
    (header::AUTHORIZATION, value)
}

#[tokio::test]
async fn list_returns_stored_slots_in_order() {
    let ctx = TestContext::new().await;
    let second = ctx
        .store
        .insert(&CreateTimeSlotRequest {
            time_range: "07:30 PM - 08:30 PM".to_string(),
            classes_by_day: Default::default(),
        })
        .await
        .unwrap();

    let response = ctx.server().get("/api/schedule").await;

    response.assert_status(StatusCode::OK);
    let slots: Vec<TimeSlot> = response.json();
    assert_eq!(slots, vec![ctx.slot.clone(), second]);
}

#[tokio::test]
async fn list_serializes_every_day_key() {
    let ctx = TestContext::new().await;
    let id = ctx.slot.id;
    let mut slot = ctx.stored().await;
    slot.classes_by_day.set(DayOfWeek::Sun, None);
    ctx.store.replace(&slot, None).await.unwrap();

    let body: Value = ctx.server().get("/api/schedule").await.json();

    assert_eq!(body[0]["id"], json!(id.to_string()));
    assert_eq!(body[0]["timeRange"], json!("06:00 AM - 07:00 AM"));
    let days = body[0]["classesByDay"].as_object().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days["Sun"], Value::Null);
    assert_eq!(
        days["Mon"],
        json!({ "name": "Morning Hatha", "location": "Studio", "type": "Personal" })
    );
}

#[tokio::test]
async fn update_replaces_only_the_supplied_day_and_notifies_once() {
    let ctx = TestContext::new().await;
    let mut viewer = ctx.notifier.subscribe().unwrap();
    let before = ctx.stored().await;

    let response = ctx
        .server()
        .put(&format!("/api/schedule/{}", ctx.slot.id))
        .json(&json!({
            "classesByDay": {
                "Mon": { "name": "Power Yoga", "location": "Online", "type": "Online" }
            }
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let updated: TimeSlot = response.json();
    assert_eq!(
        updated.classes_by_day.get(DayOfWeek::Mon),
        Some(&ClassEntry::new("Power Yoga", "Online", "Online"))
    );
    for day in DayOfWeek::ALL.into_iter().skip(1) {
        assert_eq!(
            updated.classes_by_day.get(day),
            before.classes_by_day.get(day),
            "{} changed",
            day.code()
        );
    }
    assert_eq!(updated.time_range, before.time_range);
    assert_eq!(ctx.stored().await, updated);

    assert_eq!(viewer.recv().await, Some(ScheduleEvent::updated(ctx.slot.id)));
    assert_no_event(&mut viewer).await;

    // A refetch after the event sees the new state.
    let slots: Vec<TimeSlot> = ctx.server().get("/api/schedule").await.json();
    assert_eq!(slots, vec![updated]);
}

#[tokio::test]
async fn update_accepts_legacy_field_names() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server()
        .put(&format!("/api/schedule/{}", ctx.slot.id))
        .json(&json!({
            "time": "06:30 AM - 07:30 AM",
            "classes": { "Wed": null }
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let stored = ctx.stored().await;
    assert_eq!(stored.time_range, "06:30 AM - 07:30 AM");
    assert_eq!(stored.classes_by_day.get(DayOfWeek::Wed), None);
    assert!(stored.classes_by_day.get(DayOfWeek::Thu).is_some());
}

#[tokio::test]
async fn repeating_an_update_is_idempotent_but_notifies_each_time() {
    let ctx = TestContext::new().await;
    let mut viewer = ctx.notifier.subscribe().unwrap();
    let server = ctx.server();
    let path = format!("/api/schedule/{}", ctx.slot.id);
    let payload = json!({ "timeRange": "05:45 AM - 06:45 AM" });

    let first: TimeSlot = server.put(&path).json(&payload).await.json();
    let second: TimeSlot = server.put(&path).json(&payload).await.json();

    assert_eq!(first.time_range, second.time_range);
    assert_eq!(first.classes_by_day, second.classes_by_day);
    assert_eq!(viewer.recv().await, Some(ScheduleEvent::updated(ctx.slot.id)));
    assert_eq!(viewer.recv().await, Some(ScheduleEvent::updated(ctx.slot.id)));
    assert_no_event(&mut viewer).await;
}

#[tokio::test]
async fn update_of_unknown_slot_is_not_found_and_silent() {
    let ctx = TestContext::new().await;
    let mut viewer = ctx.notifier.subscribe().unwrap();
    let missing = Uuid::new_v4();

    let response = ctx
        .server()
        .put(&format!("/api/schedule/{}", missing))
        .json(&json!({ "timeRange": "09:00 AM - 10:00 AM" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        json!(format!("Resource not found: Time slot with ID {} not found", missing))
    );
    assert_eq!(ctx.stored().await, ctx.slot);
    assert_no_event(&mut viewer).await;
}

#[tokio::test]
async fn update_with_unparseable_id_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server()
        .put("/api/schedule/not-a-slot")
        .json(&json!({ "timeRange": "09:00 AM - 10:00 AM" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_addressed_to_the_live_channel_is_not_found() {
    let ctx = TestContext::new().await;
    let mut viewer = ctx.notifier.subscribe().unwrap();

    let response = ctx
        .server()
        .put("/api/schedule/live")
        .json(&json!({ "timeRange": "09:00 AM - 10:00 AM" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        json!("Resource not found: Time slot with ID live not found")
    );
    assert_eq!(ctx.stored().await, ctx.slot);
    assert_no_event(&mut viewer).await;
}

#[tokio::test]
async fn null_cell_fields_are_stored_blank() {
    let ctx = TestContext::new().await;
    let mut viewer = ctx.notifier.subscribe().unwrap();

    let response = ctx
        .server()
        .put(&format!("/api/schedule/{}", ctx.slot.id))
        .json(&json!({
            "classesByDay": { "Mon": { "name": null, "location": "Studio", "type": "Rest" } }
        }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        ctx.stored().await.classes_by_day.get(DayOfWeek::Mon),
        Some(&ClassEntry::new("", "Studio", "Rest"))
    );
    assert_eq!(viewer.recv().await, Some(ScheduleEvent::updated(ctx.slot.id)));
    assert_no_event(&mut viewer).await;
}

#[rstest]
#[case::empty_payload(json!({}))]
#[case::blank_time_range(json!({ "timeRange": "   " }))]
#[case::numeric_time_range(json!({ "timeRange": 42 }))]
#[case::cell_is_a_string(json!({ "classesByDay": { "Mon": "Power Yoga" } }))]
#[case::unknown_day(json!({ "classesByDay": { "Funday": null } }))]
#[case::days_as_list(json!({ "classesByDay": [1, 2, 3] }))]
#[case::version_zero(json!({ "timeRange": "09:00 AM - 10:00 AM", "version": 0 }))]
#[tokio::test]
async fn malformed_update_is_rejected_without_side_effects(#[case] payload: Value) {
    let ctx = TestContext::new().await;
    let mut viewer = ctx.notifier.subscribe().unwrap();

    let response = ctx
        .server()
        .put(&format!("/api/schedule/{}", ctx.slot.id))
        .json(&payload)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert_eq!(ctx.stored().await, ctx.slot);
    assert_no_event(&mut viewer).await;
}

#[tokio::test]
async fn update_with_non_json_body_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server()
        .put(&format!("/api/schedule/{}", ctx.slot.id))
        .text("Mon=Power Yoga")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.stored().await, ctx.slot);
}

#[tokio::test]
async fn stale_version_is_a_conflict() {
    let ctx = TestContext::new().await;
    let server = ctx.server();
    let path = format!("/api/schedule/{}", ctx.slot.id);

    let fresh = server
        .put(&path)
        .json(&json!({ "timeRange": "06:15 AM - 07:15 AM", "version": 1 }))
        .await;
    fresh.assert_status(StatusCode::OK);
    let stored = ctx.stored().await;
    assert_eq!(stored.version, 2);

    let mut viewer = ctx.notifier.subscribe().unwrap();
    let stale = server
        .put(&path)
        .json(&json!({ "timeRange": "06:30 AM - 07:30 AM", "version": 1 }))
        .await;

    stale.assert_status(StatusCode::CONFLICT);
    assert_eq!(ctx.stored().await, stored);
    assert_no_event(&mut viewer).await;
}

#[tokio::test]
async fn create_appends_a_slot_and_notifies() {
    let ctx = TestContext::new().await;
    let mut viewer = ctx.notifier.subscribe().unwrap();

    let response = ctx
        .server()
        .post("/api/schedule")
        .json(&json!({
            "timeRange": "12:00 PM - 01:00 PM",
            "classesByDay": {
                "Sat": { "name": "Kids Yoga", "location": "Studio", "type": "Special Program" }
            }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: TimeSlot = response.json();
    assert_eq!(created.version, 1);
    assert_eq!(created.classes_by_day.get(DayOfWeek::Mon), None);
    assert_eq!(viewer.recv().await, Some(ScheduleEvent::updated(created.id)));

    let slots: Vec<TimeSlot> = ctx.server().get("/api/schedule").await.json();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1], created);
}

#[tokio::test]
async fn create_without_time_range_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server()
        .post("/api/schedule")
        .json(&json!({ "classesByDay": {} }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn admin_gate_guards_writes_only() {
    let ctx = TestContext::with_admin_gate().await;
    let server = ctx.server();
    let path = format!("/api/schedule/{}", ctx.slot.id);
    let payload = json!({ "timeRange": "06:15 AM - 07:15 AM" });

    server.get("/api/schedule").await.assert_status(StatusCode::OK);

    server
        .put(&path)
        .json(&payload)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = basic_auth(ADMIN_USERNAME, "wrong-password");
    server
        .put(&path)
        .add_header(name, value)
        .json(&payload)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.stored().await, ctx.slot);

    let (name, value) = basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD);
    server
        .put(&path)
        .add_header(name, value)
        .json(&payload)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(ctx.stored().await.time_range, "06:15 AM - 07:15 AM");
}

#[rstest]
#[case::unknown_admin(Ok(false), StatusCode::UNAUTHORIZED)]
#[case::admin_store_down(
    Err(ScheduleError::StorageUnavailable(eyre::eyre!("connection refused"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[tokio::test]
async fn admin_gate_refuses_unverified_writes(
    #[case] verdict: ScheduleResult<bool>,
    #[case] expected: StatusCode,
) {
    let ctx = TestContext::new().await;
    let mut admins = MockAdminStore::new();
    admins
        .expect_verify_admin()
        .withf(|username, password| username == ADMIN_USERNAME && password == ADMIN_PASSWORD)
        .times(1)
        .return_once(move |_, _| verdict);
    let admins: Arc<dyn AdminStore> = Arc::new(admins);
    let state = ApiState::new(ctx.state.service.clone(), Some(admins));
    let server = TestServer::new(router(Arc::new(state))).unwrap();
    let mut viewer = ctx.notifier.subscribe().unwrap();

    let (name, value) = basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD);
    server
        .put(&format!("/api/schedule/{}", ctx.slot.id))
        .add_header(name, value)
        .json(&json!({ "timeRange": "06:15 AM - 07:15 AM" }))
        .await
        .assert_status(expected);

    assert_eq!(ctx.stored().await, ctx.slot);
    assert_no_event(&mut viewer).await;
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let mut store = MockScheduleStore::new();
    store.expect_list().returning(|| {
        Err(ScheduleError::StorageUnavailable(eyre::eyre!(
            "connection refused"
        )))
    });
    store.expect_get().returning(|_| {
        Err(ScheduleError::StorageUnavailable(eyre::eyre!(
            "connection refused"
        )))
    });
    store.expect_replace().times(0);

    let notifier = ScheduleNotifier::new(8, 8);
    let mut viewer = notifier.subscribe().unwrap();
    let service = ScheduleService::new(Arc::new(store), notifier);
    let server = TestServer::new(router(Arc::new(ApiState::new(service, None)))).unwrap();

    let response = server.get("/api/schedule").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    server
        .put(&format!("/api/schedule/{}", Uuid::new_v4()))
        .json(&json!({ "timeRange": "09:00 AM - 10:00 AM" }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_no_event(&mut viewer).await;
}

#[tokio::test]
async fn health_reports_connected_viewers() {
    let ctx = TestContext::new().await;
    let _viewer = ctx.notifier.subscribe().unwrap();

    let body: Value = ctx.server().get("/health").await.json();
    assert_eq!(body, json!({ "status": "ok", "viewers": 1 }));

    let version: Value = ctx.server().get("/version").await.json();
    assert_eq!(version["version"], json!(env!("CARGO_PKG_VERSION")));
}
