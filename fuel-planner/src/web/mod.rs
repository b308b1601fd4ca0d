//! Web layer for the fuel route planner.
//!
//! Provides the route planning endpoint and a small map frontend.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, PrettyJson, create_router};
pub use state::AppState;
pub use templates::*;
