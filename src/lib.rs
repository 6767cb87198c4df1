//! Delivery time estimates with a model-backed remote path and an offline
//! heuristic fallback that produce the same result shape.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
