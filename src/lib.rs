pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
