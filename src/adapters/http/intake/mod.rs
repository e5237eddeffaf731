//! HTTP adapter for the guided dialogue.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::IntakeAppState;
pub use routes::{intake_router, intake_routes};
