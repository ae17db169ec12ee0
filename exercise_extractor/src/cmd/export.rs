use crate::modules::{
    history::generator::HistoryGenerator,
    submissions::{
        client::{Credentials, LeetCodeClient, DEFAULT_BASE_URL},
        crawler::{SubmissionCrawler, SubmissionSource},
        scraper::{DetailPageScraper, PageScraper},
    },
};
use anyhow::{Context, Result};
use clap::Args;
use std::{
    env,
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::Duration,
};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Account to sign in with. Falls back to LEETCODE_USER.
    #[arg(long)]
    user: Option<String>,
    /// Falls back to LEETCODE_PASSWORD.
    #[arg(long)]
    password: Option<String>,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Write the script to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Milliseconds to wait between listing pages.
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[derive(Debug)]
pub struct ExportConfig {
    pub credentials: Credentials,
    pub base_url: String,
    pub output: Option<PathBuf>,
    pub interval: Duration,
    pub timeout: Duration,
}

impl ExportConfig {
    pub fn from_args(args: ExportArgs) -> Result<Self> {
        let user = match args.user {
            Some(user) => user,
            None => env::var("LEETCODE_USER").with_context(|| {
                let message = "--user or LEETCODE_USER must be configured.";
                tracing::error!(message);
                message
            })?,
        };
        let password = match args.password {
            Some(password) => password,
            None => env::var("LEETCODE_PASSWORD").with_context(|| {
                let message = "--password or LEETCODE_PASSWORD must be configured.";
                tracing::error!(message);
                message
            })?,
        };

        Ok(Self {
            credentials: Credentials::new(&user, &password),
            base_url: args.base_url,
            output: args.output,
            interval: Duration::from_millis(args.interval_ms),
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

/// Crawls every accepted problem and renders the history script, oldest commit first.
pub async fn export_script<S, P>(
    crawler: &SubmissionCrawler<'_, S, P>,
    generator: &HistoryGenerator,
) -> Result<String>
where
    S: SubmissionSource + Sync,
    P: PageScraper + Sync,
{
    let submissions = crawler
        .crawl_chronological()
        .await
        .context("failed to crawl submissions")?;
    let script = generator
        .generate(&submissions)
        .context("failed to generate the history script")?;

    Ok(script)
}

pub async fn run(args: ExportArgs) -> Result<()> {
    let config = ExportConfig::from_args(args)?;

    let client = LeetCodeClient::new(&config.base_url, config.timeout)
        .with_context(|| format!("failed to create a client for {}", config.base_url))?;
    client.login(&config.credentials).await.with_context(|| {
        let message = format!("failed to sign in as {}", config.credentials.user);
        tracing::error!(message);
        message
    })?;

    let scraper = DetailPageScraper::new(client.base_url().clone());
    let crawler = SubmissionCrawler::new(&client, &scraper).with_interval(config.interval);
    let generator = HistoryGenerator::new(&config.credentials.user);

    let script = export_script(&crawler, &generator).await?;

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(script.as_bytes())?;
            writer.flush()?;
            tracing::info!("History script written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(script.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
