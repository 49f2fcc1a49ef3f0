//! Conversions from external infrastructure errors into domain errors.

use calsift_domain::CalSiftError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CalSiftError);

impl From<InfraError> for CalSiftError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CalSiftError> for InfraError {
    fn from(value: CalSiftError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCalSiftError {
    fn into_calsift(self) -> CalSiftError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CalSiftError */
/* -------------------------------------------------------------------------- */

impl IntoCalSiftError for HttpError {
    fn into_calsift(self) -> CalSiftError {
        if self.is_timeout() {
            return CalSiftError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CalSiftError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return CalSiftError::Internal(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
            return CalSiftError::UpstreamQuery { status: code, body: message };
        }

        CalSiftError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_calsift())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
