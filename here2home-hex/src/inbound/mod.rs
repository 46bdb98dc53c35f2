//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the converter session.

pub mod handlers;
mod server;

pub use server::HttpServer;
