use reqwest::StatusCode;
use thiserror::Error;

/// Why a provider could not deliver its section
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("no data for {0}")]
    NotFound(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Map a non-success HTTP status
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => ProviderError::Rejected("API key was not accepted".to_string()),
            429 => ProviderError::RateLimited,
            code => ProviderError::Status(code),
        }
    }

    pub fn malformed(err: impl std::fmt::Display) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Malformed(err.without_url().to_string())
        } else {
            // The URL carries the API key
            ProviderError::Network(err.without_url().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::TOO_MANY_REQUESTS, ProviderError::RateLimited)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, ProviderError::Status(500))]
    #[case(StatusCode::NOT_FOUND, ProviderError::Status(404))]
    #[case(
        StatusCode::UNAUTHORIZED,
        ProviderError::Rejected("API key was not accepted".to_string())
    )]
    fn test_status_mapping(#[case] status: StatusCode, #[case] expected: ProviderError) {
        assert_eq!(ProviderError::from_status(status), expected);
    }
}
