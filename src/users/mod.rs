mod dto;
pub mod handlers;
mod repo;
mod validate;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
