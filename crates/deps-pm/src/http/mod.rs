//! HTTP access for search queries and artifact downloads.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpError};

use crate::DepsError;

impl From<HttpError> for DepsError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Request(e) => DepsError::Network(e),
            HttpError::HttpStatus { status, url } => DepsError::HttpStatus { status, url },
            HttpError::Io(e) => DepsError::Io(e),
            HttpError::JsonParse(message) => DepsError::Parse(message),
            HttpError::DeadlineExceeded { elapsed, budget } => DepsError::Timeout { elapsed, budget },
        }
    }
}
