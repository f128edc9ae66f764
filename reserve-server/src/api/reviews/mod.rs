//! Reviews API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", routes())
}

fn routes() -> Router<ServerState> {
    // GET is public (the auth middleware lets it through); POST needs a
    // logged-in user
    Router::new().route("/", get(handler::list).post(handler::add))
}
