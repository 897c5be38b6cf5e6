//! Error handling for the application

use thiserror::Error;

/// Pool API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Pool API request failed with status: {0}")]
    BadStatus(u16),

    #[error("Pool API response body was not valid JSON: {0}")]
    InvalidBody(String),
}
