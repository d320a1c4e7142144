//! Clients for the external services the backend delegates to.
//!
//! Both integrations sit behind a trait so the application state can hold them as
//! `Arc<dyn ...>` and tests can point them at a mock HTTP server. A missing client in
//! the state means the integration is not configured.

pub mod ai;
pub mod media;
