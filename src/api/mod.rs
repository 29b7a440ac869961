//! API Module
//!
//! HTTP handlers and routing for the banner service REST API.
//!
//! # Endpoints
//! - `GET /api/v1/counter/:id` - Record a click and return the new total
//! - `POST /api/v1/stats/:id` - Click counts within a time period
//! - `/api/v1/banners[...]` - Banner CRUD, rankings and statistics
//! - `/api/v1/clicks[...]` - Record, read and delete clicks
//! - `/api/v1/cache/...` - Cache statistics, clearing, warming and invalidation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
