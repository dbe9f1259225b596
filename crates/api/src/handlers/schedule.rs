use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use studiosync_core::{
    errors::ScheduleError,
    models::{
        schedule::{CreateTimeSlotRequest, UpdateTimeSlotRequest},
        time_slot::TimeSlot,
    },
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// An id that cannot name a slot is reported the same way as an unknown one.
fn parse_slot_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError(ScheduleError::slot_not_found(raw)))
}

#[axum::debug_handler]
pub async fn list_schedule(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = state.service.list_schedule().await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTimeSlotRequest>, JsonRejection>,
) -> Result<Json<TimeSlot>, AppError> {
    let id = parse_slot_id(&id)?;
    let Json(update) = payload?;

    let slot = state.service.update_slot(id, update).await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateTimeSlotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TimeSlot>), AppError> {
    let Json(request) = payload?;

    let slot = state.service.create_slot(request).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}
