//! # openheart-api
//!
//! HTTP companion for the reaction service, built with Axum. Mounts a
//! GET/POST pair per reaction-enabled endpoint and maps service errors to
//! protocol status codes (notably 418 for rejected reactions).

pub mod config;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
