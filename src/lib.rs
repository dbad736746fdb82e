//! REST backend for football leagues and their teams.
//!
//! Each entity exposes create, list, read, replace and delete endpoints.
//! Requests pass through a validation chain before a handler performs a
//! single store operation against SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;

pub use routes::app;
