use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_report_title")]
    pub report_title: String,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default = "default_page_timeout")]
    pub page_timeout: u64,

    #[serde(default = "default_chrome_impersonation")]
    pub chrome_impersonation: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub proxy: Option<String>,

    /// Page names to run; empty runs every registered page.
    #[serde(default)]
    pub pages: Vec<String>,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output_dir: default_output_dir(),
            report_title: default_report_title(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            request_timeout: default_request_timeout(),
            page_timeout: default_page_timeout(),
            chrome_impersonation: default_chrome_impersonation(),
            user_agent: default_user_agent(),
            proxy: None,
            pages: Vec::new(),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        let config = Self::from_toml(&content)?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Reads `path` when it exists, otherwise starts from the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// File name prefix of the combined report, e.g. `Раздел_1`.
    pub fn report_prefix(&self) -> String {
        self.report_title.trim().replace(' ', "_")
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingField("base_url".to_string()).into());
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "base_url must start with http(s): {}",
                self.base_url
            ))
            .into());
        }

        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::MissingField("output_dir".to_string()).into());
        }

        if self.report_title.trim().is_empty() {
            return Err(ConfigError::MissingField("report_title".to_string()).into());
        }

        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue(
                "max_retries must be greater than 0".to_string(),
            )
            .into());
        }

        if self.retry_delay == 0 {
            return Err(ConfigError::InvalidValue(
                "retry_delay must be greater than 0".to_string(),
            )
            .into());
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "request_timeout must be greater than 0".to_string(),
            )
            .into());
        }

        if self.page_timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "page_timeout must be greater than 0".to_string(),
            )
            .into());
        }

        if let Some(proxy) = &self.proxy {
            if proxy.trim().is_empty() {
                return Err(
                    ConfigError::InvalidValue("proxy cannot be empty".to_string()).into(),
                );
            }
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://academydpo.org".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_report_title() -> String {
    "Раздел 1".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    2
}

fn default_request_timeout() -> u64 {
    30
}

fn default_page_timeout() -> u64 {
    300
}

fn default_chrome_impersonation() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "scraper.log".to_string()
}
