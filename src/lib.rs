pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod pages;
pub mod report;
pub mod runner;
pub mod scraper;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use pages::{all_pages, find_page, SitePage};
pub use report::ReportBuilder;
pub use runner::{RunSummary, Runner};
