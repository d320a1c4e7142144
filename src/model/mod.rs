//! Data transfer objects exchanged over the HTTP API.
//!
//! Every request body, query and response shape the controllers accept or return
//! lives here. The server-side domain models in `server::model` convert into these
//! types with `into_dto` and are built from them with `from_dto`.

pub mod ai;
pub mod api;
pub mod application;
pub mod auth;
pub mod course;
pub mod dashboard;
pub mod download;
pub mod media;
pub mod resource;
pub mod user;
