//! HTTP request handlers.
//!
//! Each handler authenticates the caller through [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! converts request DTOs into domain parameters, calls the matching service and
//! converts the result back into a response DTO. Handlers carry `utoipa::path`
//! annotations which the router collects into the OpenAPI document.

pub mod admin;
pub mod ai;
pub mod application;
pub mod auth;
pub mod course;
pub mod curriculum;
pub mod dashboard;
pub mod download;
pub mod enrollment;
pub mod health;
pub mod media;
pub mod resource;
pub mod review;
