use crate::{
    modules::submissions::scraper::PageScraper,
    types::{
        submission::{package_name, parse_run_time},
        Language, Submission, SubmissionPage, SubmissionSummary,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use exercise_extractor_libs::{relative_time::parse_relative_time, Result};
use std::collections::HashSet;
use tokio::time::{self, Duration};

/// Upper bound on listing pages, in case the service never stops reporting `has_next`.
pub const MAX_PAGES: usize = 10_000;

/// Authenticated access to the submission listing and detail pages.
#[async_trait]
pub trait SubmissionSource {
    async fn fetch_page(&self, page: usize) -> Result<SubmissionPage>;
    async fn fetch_detail(&self, path: &str) -> Result<String>;
}

pub struct SubmissionCrawler<'a, S, P> {
    source: &'a S,
    scraper: &'a P,
    interval: Duration,
    clock: fn() -> DateTime<Local>,
}

impl<'a, S, P> SubmissionCrawler<'a, S, P>
where
    S: SubmissionSource + Sync,
    P: PageScraper + Sync,
{
    pub fn new(source: &'a S, scraper: &'a P) -> Self {
        Self {
            source,
            scraper,
            interval: Duration::ZERO,
            clock: Local::now,
        }
    }

    /// Wait between two listing page requests.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replaces the clock relative submit times are subtracted from.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// Fetches the detail page of one accepted submission and builds its record.
    pub async fn resolve(&self, summary: &SubmissionSummary) -> Result<Submission> {
        let submit_time = parse_relative_time(&summary.time, (self.clock)())?;
        let language: Language = summary.lang.parse()?;
        let run_time = parse_run_time(&summary.runtime)?;

        let html = self.source.fetch_detail(&summary.url).await?;
        let detail = self.scraper.scrape(&html)?;

        Ok(Submission {
            submit_time,
            package_name: package_name(&summary.title),
            link: detail.link,
            description: detail.description,
            solution: detail.solution,
            name: summary.title.clone(),
            run_time,
            language,
        })
    }

    /// Walks the listing and resolves every accepted problem once.
    ///
    /// Records are returned in listing order, i.e. most recent first.
    pub async fn crawl(&self) -> Result<Vec<Submission>> {
        tracing::info!("Start to crawl accepted submissions.");

        let mut visited: HashSet<String> = HashSet::new();
        let mut submissions: Vec<Submission> = Vec::new();

        for page in 1..=MAX_PAGES {
            let listing = match self.source.fetch_page(page).await {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::error!("failed to fetch submission listing page {}: {}", page, e);
                    return Err(e);
                }
            };
            tracing::info!(
                "Crawl submission listing page {} with {} submissions",
                page,
                listing.submissions_dump.len()
            );

            for summary in listing.submissions_dump.iter().filter(|s| s.is_accepted()) {
                if !visited.insert(summary.title.clone()) {
                    tracing::debug!("Skip already resolved problem {}", summary.title);
                    continue;
                }

                match self.resolve(summary).await {
                    Ok(submission) => {
                        tracing::info!(
                            "Problem {} was resolved ({}, {} ms).",
                            submission.name,
                            submission.language,
                            submission.run_time.as_millis()
                        );
                        submissions.push(submission);
                    }
                    Err(e) => {
                        tracing::error!(
                            "an error occurred at resolving {:?} ({}) on page {}: {}",
                            summary.title,
                            summary.url,
                            page,
                            e
                        );
                        return Err(e);
                    }
                }
            }

            if !listing.has_next() {
                break;
            }
            if page == MAX_PAGES {
                tracing::warn!("Stop crawling at the page limit {}.", MAX_PAGES);
                break;
            }
            if !self.interval.is_zero() {
                time::sleep(self.interval).await;
            }
        }

        tracing::info!("{} problems successfully crawled.", submissions.len());

        Ok(submissions)
    }

    /// Same as [`crawl`](Self::crawl), but oldest first.
    pub async fn crawl_chronological(&self) -> Result<Vec<Submission>> {
        let mut submissions = self.crawl().await?;
        submissions.reverse();
        Ok(submissions)
    }
}
