use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised by the clients for external services (AI completions, media host).
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The integration has no endpoint or credentials configured.
    ///
    /// Results in 503 Service Unavailable.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Transport failure reaching the upstream service.
    ///
    /// Results in 502 Bad Gateway.
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with an error status or an unusable body.
    ///
    /// Results in 502 Bad Gateway.
    #[error("Upstream service error: {0}")]
    Upstream(String),
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotConfigured(service) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{} is not available", service),
            ),
            Self::Request(_) | Self::Upstream(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream service request failed".to_string(),
                )
            }
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
