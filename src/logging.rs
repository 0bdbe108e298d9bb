#![cfg(feature = "logging")]

use crate::utils::truncate_str;
use crate::ScrapeJob;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: true,
        }
    }
}

/// Logs a boxed summary of a finished scrape job.
pub fn log_job_card(job: &ScrapeJob) {
    const CARD_WIDTH: usize = 72;

    let horizontal_line = "═".repeat(CARD_WIDTH - 2);
    let site = job
        .site
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "unsupported".to_string());

    info!(
        "\n╔{}╗\n\
         URL: {}\n\
         Site: {}\n\
         Product: {}\n\
         Pages requested: {}\n\
         Records: {}\n\
         Warnings: {}\n\
         ╚{}╝",
        horizontal_line,
        truncate_str(&job.input_url, CARD_WIDTH - 7),
        site,
        truncate_str(&job.product, CARD_WIDTH - 11),
        job.pages_requested,
        job.records.len(),
        job.warnings.len(),
        horizontal_line,
    );
}

pub fn setup_logging(config: LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty();
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir).expect("Failed to create log directory");

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "review-scraper.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .expect("Failed to set global default subscriber");

    debug!("logging initialized with config: {:?}", config);
}
