#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client for the Locator Service.
//!
//! Two JSON endpoints are consumed:
//!
//! - `GET /api/search?q=<text>` returns an array of [`SearchResult`] in
//!   relevance order (an empty array is a valid answer).
//! - `GET /api/location/<name>` returns a single [`LocationDetail`]. A 404
//!   means the name is unknown; any other non-2xx status is a generic
//!   load failure.
//!
//! The [`LocatorService`] trait is the seam the typeahead controller is
//! written against, so tests can substitute an in-memory fake for
//! [`HttpLocator`].

use std::time::Duration;

use livability_locator_models::{LocationDetail, SearchResult};
use thiserror::Error;

pub use livability_locator_models as models;

/// User-visible message for a failed search.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed";

/// User-visible message for a 404 on detail lookup.
pub const NOT_FOUND_MESSAGE: &str = "Location not found";

/// User-visible message for any other detail lookup failure.
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load location details";

/// Errors from Locator Service calls.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The detail endpoint answered 404.
    #[error("Location not found: {name}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The service answered with a non-2xx status other than a detail 404.
    #[error("Locator service returned HTTP {status}")]
    Status {
        /// The status code received.
        status: u16,
    },

    /// HTTP request failed before a status was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid locator base URL: {url}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
    },
}

impl LocatorError {
    /// Message shown to the user when a detail lookup fails with this
    /// error.
    #[must_use]
    pub const fn detail_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => NOT_FOUND_MESSAGE,
            _ => DETAIL_FAILED_MESSAGE,
        }
    }
}

/// Query and detail lookups against a Locator Service.
#[async_trait::async_trait]
pub trait LocatorService: Send + Sync {
    /// Searches locations matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] on transport failure, a non-2xx status, or
    /// an unparsable body.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, LocatorError>;

    /// Loads the full record for a location name.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::NotFound`] on a 404 and other
    /// [`LocatorError`] variants for every other failure.
    async fn location(&self, name: &str) -> Result<LocationDetail, LocatorError>;
}

/// [`LocatorService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLocator {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpLocator {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidUrl`] if `base_url` does not parse or
    /// cannot be a base, and [`LocatorError::Http`] if the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LocatorError> {
        let base_url = reqwest::Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| LocatorError::InvalidUrl {
                url: base_url.to_string(),
            })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, LocatorError> {
        endpoint_url(&self.base_url, segments)
    }
}

#[async_trait::async_trait]
impl LocatorService for HttpLocator {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, LocatorError> {
        let url = self.endpoint(&["api", "search"])?;
        log::debug!("search: GET {url} q={query:?}");

        let resp = self.client.get(url).query(&[("q", query)]).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LocatorError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_search_response(body)
    }

    async fn location(&self, name: &str) -> Result<LocationDetail, LocatorError> {
        let url = self.endpoint(&["api", "location", name])?;
        log::debug!("location: GET {url}");

        let resp = self.client.get(url).send().await?;
        check_detail_status(resp.status().as_u16(), name)?;

        let body: serde_json::Value = resp.json().await?;
        Ok(serde_json::from_value(body)?)
    }
}

/// Appends path segments to `base`, percent-encoding each one.
fn endpoint_url(base: &reqwest::Url, segments: &[&str]) -> Result<reqwest::Url, LocatorError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| LocatorError::InvalidUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Maps a detail response status to the not-found / generic split.
fn check_detail_status(status: u16, name: &str) -> Result<(), LocatorError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(LocatorError::NotFound {
            name: name.to_string(),
        }),
        _ => Err(LocatorError::Status { status }),
    }
}

fn parse_search_response(body: serde_json::Value) -> Result<Vec<SearchResult>, LocatorError> {
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use livability_locator_models::CrimeLevel;

    #[test]
    fn detail_status_distinguishes_not_found() {
        assert!(check_detail_status(200, "Saket").is_ok());

        let err = check_detail_status(404, "Saket").unwrap_err();
        assert!(matches!(err, LocatorError::NotFound { ref name } if name == "Saket"));
        assert_eq!(err.detail_message(), "Location not found");

        let err = check_detail_status(500, "Saket").unwrap_err();
        assert!(matches!(err, LocatorError::Status { status: 500 }));
        assert_eq!(err.detail_message(), "Failed to load location details");

        let err = check_detail_status(403, "Saket").unwrap_err();
        assert_eq!(err.detail_message(), DETAIL_FAILED_MESSAGE);
    }

    #[test]
    fn location_names_are_encoded_as_one_segment() {
        let base = reqwest::Url::parse("http://localhost:5000/").unwrap();
        let url = endpoint_url(&base, &["api", "location", "Lajpat Nagar/II"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/location/Lajpat%20Nagar%2FII"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = reqwest::Url::parse("http://localhost:5000/locator").unwrap();
        let url = endpoint_url(&base, &["api", "search"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/locator/api/search");
    }

    #[test]
    fn rejects_non_base_urls() {
        let err = HttpLocator::new("mailto:someone@example.com", Duration::from_secs(1));
        assert!(matches!(err, Err(LocatorError::InvalidUrl { .. })));
    }

    #[test]
    fn parses_search_results_in_order() {
        let body = serde_json::json!([
            {"location": "Saket", "zone": "South", "safety_rating": 8.1, "crime_level": "Low"},
            {"location": "Sadar Bazar", "zone": "North", "safety_rating": 4.5, "crime_level": "High"}
        ]);
        let results = parse_search_response(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].location, "Saket");
        assert_eq!(results[1].crime_level, CrimeLevel::High);
    }

    #[test]
    fn parses_empty_search() {
        assert!(parse_search_response(serde_json::json!([])).unwrap().is_empty());
    }

    #[test]
    fn search_error_body_is_a_parse_failure() {
        let body = serde_json::json!({"error": "Search failed"});
        assert!(matches!(
            parse_search_response(body),
            Err(LocatorError::Json(_))
        ));
    }
}
