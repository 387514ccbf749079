//! HTTP Layer - JSON REST API

pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use auth::{AuthError, AuthUser};
pub use error::ApiError;
pub use routes::create_routes;
pub use server::{build_router, HttpServer};
pub use state::{AppState, Repositories};
