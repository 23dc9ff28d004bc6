//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request-id, trace, timeout layers)
//!     → middleware/firewall.rs (resolve client, dispatch evaluation)
//!     → blocked: response.rs (403)
//!     → passed:  server.rs forward handler → upstream
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
