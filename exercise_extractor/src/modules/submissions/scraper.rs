use exercise_extractor_libs::{unescape::decode_unicode_escapes, ExtractError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};

/// Position of the `<script>` block holding the page data on a submission detail page.
pub const SOLUTION_SCRIPT_INDEX: usize = 7;

static SUBMISSION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"submissionCode: '(.+)',").unwrap());

/// Problem data scraped from a submission detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDetail {
    pub link: String,
    pub description: String,
    pub solution: String,
}

/// Extracts problem data from the HTML of a submission detail page.
///
/// The layout of the page is owned by the service, so every structural miss is
/// reported as [`ExtractError::NotFound`].
pub trait PageScraper {
    fn scrape(&self, html: &str) -> Result<ProblemDetail>;
}

pub struct DetailPageScraper {
    base: Url,
    script_index: usize,
    problem_anchor: Selector,
    description: Selector,
    script: Selector,
}

impl DetailPageScraper {
    pub fn new(base: Url) -> Self {
        let problem_anchor = Selector::parse(r#"a[href^="/problems/"]"#).unwrap();
        let description = Selector::parse(r#"meta[name="description"]"#).unwrap();
        let script = Selector::parse("script").unwrap();

        Self {
            base,
            script_index: SOLUTION_SCRIPT_INDEX,
            problem_anchor,
            description,
            script,
        }
    }

    fn extract_link(&self, html: &Html) -> Result<String> {
        let href = html
            .select(&self.problem_anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| ExtractError::NotFound(String::from("link to the problem page")))?;

        Ok(self.base.join(href)?.to_string())
    }

    fn extract_description(&self, html: &Html) -> String {
        html.select(&self.description)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(String::from)
            .unwrap_or_else(|| {
                tracing::warn!("problem description not found in detail page");
                String::default()
            })
    }

    fn extract_solution(&self, html: &Html) -> Result<String> {
        let script: String = html
            .select(&self.script)
            .nth(self.script_index)
            .ok_or_else(|| {
                ExtractError::NotFound(format!("script block #{}", self.script_index))
            })?
            .text()
            .collect();

        let code = SUBMISSION_CODE
            .captures(&script)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| {
                ExtractError::NotFound(format!(
                    "submission code in script block #{}",
                    self.script_index
                ))
            })?;

        decode_unicode_escapes(code.as_str())
    }
}

impl PageScraper for DetailPageScraper {
    fn scrape(&self, html: &str) -> Result<ProblemDetail> {
        let html = Html::parse_document(html);

        Ok(ProblemDetail {
            link: self.extract_link(&html)?,
            description: self.extract_description(&html),
            solution: self.extract_solution(&html)?,
        })
    }
}
