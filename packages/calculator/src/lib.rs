#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Calculation Service client and result rendering.
//!
//! `POST /calculate/<type>` takes the form fields as a flat JSON object and
//! answers with a type-specific result. Failures inside the service come
//! back as `200 {"error": "..."}`, which is surfaced as
//! [`CalculatorError::Service`].
//!
//! [`CalculatorRenderer`] drives one submission end to end: loading
//! indicator, service call, summary and chart datasets. The EMI
//! amortization schedule is computed locally from the submitted rate and
//! tenure.

pub mod amortization;
pub mod datasets;
mod renderer;
pub mod summary;

use std::time::Duration;

use livability_calculator_models::{CalculatorResult, CalculatorType, FormFields};
use thiserror::Error;

pub use livability_calculator_models as models;
pub use renderer::{CalculatorRenderer, CalculatorView, ChartBackend, render_result};

/// User-visible message for a failed calculation without a service message.
pub const CALCULATION_FAILED_MESSAGE: &str = "Calculation failed";

/// Errors from calculator submissions.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// The requested calculator type is not one of [`CalculatorType::all`].
    #[error("Unknown calculator type: {name}")]
    UnknownType {
        /// The name that was requested.
        name: String,
    },

    /// The service answered with an `error` field.
    #[error("Calculation service error: {message}")]
    Service {
        /// The service's message.
        message: String,
    },

    /// The service answered with a non-2xx status.
    #[error("Calculation service returned HTTP {status}")]
    Status {
        /// The status code received.
        status: u16,
    },

    /// HTTP request failed before a status was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the type's schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid calculator base URL: {url}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
    },
}

impl CalculatorError {
    /// Message for the error panel.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownType { .. } => summary::UNKNOWN_TYPE_MESSAGE.to_string(),
            Self::Service { message } => format!("Error: {message}"),
            _ => CALCULATION_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Parses a calculator type name (`emi`, `affordability`, ...).
///
/// # Errors
///
/// Returns [`CalculatorError::UnknownType`] for any other name.
pub fn parse_calculator_type(name: &str) -> Result<CalculatorType, CalculatorError> {
    name.parse().map_err(|_| CalculatorError::UnknownType {
        name: name.to_string(),
    })
}

/// Runs calculations against a Calculation Service.
#[async_trait::async_trait]
pub trait CalculationService: Send + Sync {
    /// Submits `fields` to the `kind` calculator.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] on transport failure, a non-2xx status,
    /// a service-reported error, or a body that does not match `kind`.
    async fn calculate(
        &self,
        kind: CalculatorType,
        fields: &FormFields,
    ) -> Result<CalculatorResult, CalculatorError>;
}

/// [`CalculationService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCalculator {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpCalculator {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::InvalidUrl`] if `base_url` does not parse
    /// or cannot be a base, and [`CalculatorError::Http`] if the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CalculatorError> {
        let base_url = reqwest::Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| CalculatorError::InvalidUrl {
                url: base_url.to_string(),
            })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, kind: CalculatorType) -> Result<reqwest::Url, CalculatorError> {
        calculate_url(&self.base_url, kind)
    }
}

#[async_trait::async_trait]
impl CalculationService for HttpCalculator {
    async fn calculate(
        &self,
        kind: CalculatorType,
        fields: &FormFields,
    ) -> Result<CalculatorResult, CalculatorError> {
        let url = self.endpoint(kind)?;
        log::debug!("calculate: POST {url} ({} fields)", fields.len());

        let resp = self.client.post(url).json(fields).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CalculatorError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        interpret_response(kind, body)
    }
}

fn calculate_url(
    base: &reqwest::Url,
    kind: CalculatorType,
) -> Result<reqwest::Url, CalculatorError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CalculatorError::InvalidUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(["calculate", kind.as_ref()]);
    Ok(url)
}

/// Interprets a successful response body for `kind`.
///
/// # Errors
///
/// Returns [`CalculatorError::Service`] if the body carries an `error`
/// string, and [`CalculatorError::Json`] if it does not match `kind`'s
/// schema.
pub fn interpret_response(
    kind: CalculatorType,
    body: serde_json::Value,
) -> Result<CalculatorResult, CalculatorError> {
    if let Some(message) = body.get("error").and_then(serde_json::Value::as_str) {
        return Err(CalculatorError::Service {
            message: message.to_string(),
        });
    }
    Ok(CalculatorResult::from_json(kind, body)?)
}
