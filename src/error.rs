use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Scraping error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Request(#[from] rquest::Error),

    #[error("Front matter error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    /// Short tag used as the `kind` field in error logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Client(_) => "client",
            AppError::Scraper(_) => "scraper",
            AppError::Io(_) => "io",
            AppError::Request(_) => "request",
            AppError::Yaml(_) => "yaml",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required configuration: {0}")]
    MissingField(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build client: {0}")]
    BuildError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response error {status_code}")]
    ResponseError { status_code: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),
}

impl ClientError {
    /// Client errors (4xx) will not change on a second attempt, except 429.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ResponseError { status_code, .. } => {
                *status_code == 429 || !(400..500).contains(status_code)
            }
            ClientError::BuildError(_) | ClientError::InvalidUrl(_) => false,
            ClientError::RequestFailed(_) | ClientError::Timeout(_) => true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    #[error("Selector error: {0}")]
    SelectorError(String),

    #[error("Page anchor not found: {0}")]
    PageNotReady(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_not_retried_but_throttling_is() {
        let not_found = ClientError::ResponseError {
            status_code: 404,
            message: String::new(),
        };
        let throttled = ClientError::ResponseError {
            status_code: 429,
            message: String::new(),
        };
        let unavailable = ClientError::ResponseError {
            status_code: 503,
            message: String::new(),
        };

        assert!(!not_found.is_retryable());
        assert!(throttled.is_retryable());
        assert!(unavailable.is_retryable());
        assert!(ClientError::Timeout(30).is_retryable());
    }

    #[test]
    fn kind_tags_follow_variant() {
        let err: AppError = ScraperError::PageNotReady("h1".into()).into();
        assert_eq!(err.kind(), "scraper");

        let err: AppError = ConfigError::MissingField("base_url".into()).into();
        assert_eq!(err.kind(), "config");
    }
}
