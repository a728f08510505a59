// src/remote/mod.rs

//! Boundary with the remote jobs service.
//!
//! - [`models`] defines the JSON bodies sent and received.
//! - [`backend`] provides the `ApiBackend` trait the rest of the crate uses.
//! - [`http`] is the `reqwest` implementation used in production.

pub mod backend;
pub mod http;
pub mod models;

pub use backend::{ApiBackend, BackendFuture};
pub use http::HttpBackend;
pub use models::{JobCreate, JobEdit, JobRecord, StatusCatalog, TaskCreate, TaskRecord};
