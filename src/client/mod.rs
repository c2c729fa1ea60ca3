mod builder;

use crate::config::Config;
use crate::error::{ClientError, Result};
pub use builder::ClientBuilder;
use rquest::Client as RquestClient;
use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    pub content: String,
}

pub struct Client {
    inner: RquestClient,
    base: Url,
    timeout: Option<Duration>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client set up the way every page fetch uses it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .base_url(&config.base_url)
            .header("user-agent", &config.user_agent)?
            .header("accept-language", "ru-RU,ru;q=0.9,en;q=0.7")?
            .chrome_impersonation(config.chrome_impersonation)
            .timeout(Duration::from_secs(config.request_timeout));

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(proxy);
        }

        builder.build()
    }

    pub async fn get(&self, path: &str) -> Result<ClientResponse> {
        let url = self.url_for(path)?;
        self.request(&url).await
    }

    /// Absolute URL of `path` on this client's site.
    pub fn url_for(&self, path: &str) -> Result<String> {
        let full_url = self
            .base
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid path {}: {}", path, e)))?;

        Ok(full_url.to_string())
    }

    async fn request(&self, url: &str) -> Result<ClientResponse> {
        let response = self.inner.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout.map_or(0, |t| t.as_secs()))
            } else {
                ClientError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let is_success = response.status().is_success();
        let content = response.text().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to get response text: {}", e))
        })?;

        if !is_success {
            return Err(ClientError::ResponseError {
                status_code: status,
                message: format!("GET {}", url),
            }
            .into());
        }

        Ok(ClientResponse { status, content })
    }
}
