//! Axum HTTP gateway that routes chat requests onto the IVOR backend
//! services, either single-target or as an orchestrated multi-service
//! fan-out. Stateless per request; the only side effects are outbound
//! HTTP calls.

pub mod forward;
pub mod models;
pub mod orchestrate;
pub mod server;

pub use forward::ForwardError;
pub use server::{router, serve};
