use crate::client::Client;
use crate::config::Config;
use crate::error::{AppError, ClientError, Result};
use crate::pages::{scrape_page, PageContext, SitePage};
use crate::{log_error, log_info, log_warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a run: pages whose file was written, and the expected paths of
/// those whose file was not.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: Vec<String>,
    pub missing: Vec<PathBuf>,
}

pub struct Runner {
    config: Config,
    client: Client,
    output_dir: PathBuf,
}

impl Runner {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::from_config(&config)?;
        let output_dir = PathBuf::from(&config.output_dir);
        Ok(Self {
            config,
            client,
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Expected output file of `page`.
    pub fn output_path(&self, page: &dyn SitePage) -> PathBuf {
        self.output_dir.join(format!("{}.md", page.name()))
    }

    /// Scrapes `pages` one after another. A failing page is logged and
    /// recorded as missing; the run always goes on.
    pub async fn run(&self, pages: &[&dyn SitePage]) -> RunSummary {
        let mut summary = RunSummary::default();

        for (idx, page) in pages.iter().enumerate() {
            log_info!(
                "[runner] Page {}/{}: {} ({})",
                idx + 1,
                pages.len(),
                page.name(),
                page.path()
            );

            match self.run_page(*page).await {
                Ok(path) => {
                    log_info!("[runner] {} written to {}", page.name(), path.display());
                    summary.succeeded.push(page.name().to_string());
                }
                Err(e) => {
                    log_error!(e => "[runner] {} failed", page.name());
                    summary.missing.push(self.output_path(*page));
                }
            }
        }

        log_info!(
            "[runner] Finished: {} of {} pages written, {} missing",
            summary.succeeded.len(),
            pages.len(),
            summary.missing.len()
        );
        summary
    }

    async fn run_page(&self, page: &dyn SitePage) -> Result<PathBuf> {
        let budget = Duration::from_secs(self.config.page_timeout);
        match tokio::time::timeout(budget, self.process(page)).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.config.page_timeout).into()),
        }
    }

    async fn process(&self, page: &dyn SitePage) -> Result<PathBuf> {
        let html = self.fetch(page.path()).await?;
        let ctx = PageContext {
            url: self.client.url_for(page.path())?,
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        };

        let document = scrape_page(page, &html, &ctx)?;
        document.write_to(&self.output_dir, page.name())
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(path).await {
                Ok(response) => {
                    log_info!(
                        "[runner] Received {}: status {}, {} bytes",
                        path,
                        response.status,
                        response.content.len()
                    );
                    return Ok(response.content);
                }
                Err(e) => {
                    let retryable = match &e {
                        AppError::Client(client_err) => client_err.is_retryable(),
                        _ => true,
                    };
                    if !retryable || attempt >= self.config.max_retries {
                        return Err(e);
                    }
                    log_warn!(
                        "[runner] Attempt {}/{} for {} failed: {}. Waiting {} seconds...",
                        attempt,
                        self.config.max_retries,
                        path,
                        e,
                        self.config.retry_delay
                    );
                    tokio::time::sleep(Duration::from_secs(self.config.retry_delay)).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::find_page;

    #[test]
    fn output_path_uses_page_name() {
        let config = Config {
            output_dir: "out".to_string(),
            chrome_impersonation: false,
            ..Config::default()
        };
        let runner = Runner::new(config).unwrap();
        let page = find_page("DPO_FAQ").unwrap();
        assert_eq!(runner.output_path(page), Path::new("out").join("DPO_FAQ.md"));
    }
}
