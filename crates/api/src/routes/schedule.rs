use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers, middleware::auth};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let admin_gate = middleware::from_fn_with_state(state, auth::require_admin);

    Router::new()
        .route(
            "/api/schedule",
            get(handlers::schedule::list_schedule)
                .merge(post(handlers::schedule::create_slot).route_layer(admin_gate.clone())),
        )
        // The static segment shadows `:id`; a write here is a write to a
        // slot named "live", which does not exist.
        .route(
            "/api/schedule/live",
            get(handlers::live::schedule_live)
                .merge(put(handlers::schedule::update_slot).route_layer(admin_gate.clone())),
        )
        .route(
            "/api/schedule/:id",
            put(handlers::schedule::update_slot).route_layer(admin_gate),
        )
}
