//! Reports API module - staff only

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/daily", get(handler::daily))
        .route("/weekly", get(handler::weekly))
        .layer(middleware::from_fn(require_staff))
}
