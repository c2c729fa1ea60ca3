use academy_scraper::config::Config;
use academy_scraper::error::{AppError, ConfigError, Result};
use academy_scraper::logging::{init_logging, parse_log_level, LoggerConfig};
use academy_scraper::pages::{all_pages, find_page, SitePage};
use academy_scraper::report::ReportBuilder;
use academy_scraper::runner::Runner;
use academy_scraper::{log_error, log_info};
use clap::Parser;

#[derive(Parser)]
#[command(name = "academy-scraper")]
#[command(about = "Scrapes academydpo.org pages into Markdown and combines them into a report")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Page to run (repeatable); overrides `pages` from the config
    #[arg(short, long)]
    page: Vec<String>,

    /// Print the known pages and exit
    #[arg(long)]
    list: bool,

    /// Skip building the combined report
    #[arg(long)]
    no_report: bool,
}

fn select_pages(names: &[String]) -> Result<Vec<&'static dyn SitePage>> {
    if names.is_empty() {
        return Ok(all_pages());
    }
    names
        .iter()
        .map(|name| {
            find_page(name).ok_or_else(|| {
                AppError::from(ConfigError::InvalidValue(format!("unknown page: {}", name)))
            })
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    if cli.list {
        for page in all_pages() {
            println!("{}\t{}{}", page.name(), config.base_url, page.path());
        }
        return Ok(());
    }

    init_logging(LoggerConfig {
        directory: config.logging.directory.clone(),
        file_name: config.logging.filename.clone(),
        rotation: tracing_appender::rolling::Rotation::DAILY,
        level: parse_log_level(&config.logging.level)?,
    })?;

    log_info!("[main] Starting scraper for {}", config.base_url);

    let names = if cli.page.is_empty() {
        config.pages.clone()
    } else {
        cli.page.clone()
    };
    let pages = select_pages(&names)?;

    let runner = Runner::new(config.clone())?;
    let summary = runner.run(&pages).await;
    log_info!(
        "[main] {} of {} pages succeeded, {} missing",
        summary.succeeded.len(),
        pages.len(),
        summary.missing.len()
    );

    if cli.no_report {
        return Ok(());
    }

    let report = ReportBuilder::new(
        runner.output_dir(),
        &config.report_title,
        all_pages().iter().map(|page| page.name()),
    );
    match report.build(&summary.missing) {
        Ok(path) => log_info!("[main] Report created: {}", path.display()),
        Err(e) => {
            log_error!(e => "[main] Failed to build report");
            return Err(e);
        }
    }

    Ok(())
}
