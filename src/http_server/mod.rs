//! # TripDesk HTTP Server
//!
//! Axum HTTP API over the auth and travel services.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/user/*` - Registration, login, and self-service travel requests
//! - `/admin/*` - Admin login and travel-request administration

pub mod admin_travel_routes;
pub mod auth_routes;
pub mod config;
pub mod response;
pub mod server;
pub mod state;
pub mod user_travel_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
pub use state::AppState;
