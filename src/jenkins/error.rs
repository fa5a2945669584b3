//! Error types for the Jenkins HTTP client.
//!
//! [`JenkinsError`] messages are shown to the user as-is when a run fails,
//! so each variant renders a complete sentence without extra prefixes.

use thiserror::Error;

/// Errors that can occur while talking to a Jenkins controller.
#[derive(Debug, Error)]
pub enum JenkinsError {
    /// The base URL input was empty.
    #[error("baseUrl required")]
    MissingBaseUrl,

    /// The base URL could not be parsed or uses an unsupported scheme.
    #[error("invalid baseUrl {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The job locator did not contain any job name.
    #[error("name required")]
    NameRequired,

    /// Jenkins answered 404 for the job.
    #[error("{0} not found")]
    NotFound(String),

    /// Any other non-success response. `message` is either the controller's
    /// `X-Error` header or a summary of the request and status.
    #[error("{message}")]
    ApiError { status: u16, message: String },

    /// CSRF protection is enabled but the crumb issuer returned no crumb.
    #[error("Failed to get crumb")]
    CrumbUnavailable,

    /// Underlying transport failure (DNS, refused connection, timeout, bad body).
    #[error("{0}")]
    NetworkError(#[from] reqwest::Error),
}
