use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageryError {
    #[error("imagery access token is not configured")]
    Configuration,

    #[error("imagery provider is rate-limiting us")]
    TooManyRequests,

    #[error("imagery provider answered with HTTP {status}")]
    Upstream { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected imagery provider response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ImageryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ImageryError::Decode(err.to_string())
        } else {
            ImageryError::Network(err.to_string())
        }
    }
}
