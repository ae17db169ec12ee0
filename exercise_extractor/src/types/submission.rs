use crate::types::language::Language;
use chrono::{DateTime, Local};
use exercise_extractor_libs::{ExtractError, Result};
use serde::Deserialize;
use std::time::Duration;

/// One entry of the submission listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionSummary {
    pub title: String,
    pub status_display: String,
    pub lang: String,
    pub runtime: String,
    /// Relative submit time such as `2 years, 3 weeks`.
    pub time: String,
    /// Path of the detail page.
    pub url: String,
}

impl SubmissionSummary {
    pub fn is_accepted(&self) -> bool {
        self.status_display == "Accepted"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionPage {
    pub submissions_dump: Vec<SubmissionSummary>,
    #[serde(default)]
    pub has_next: Option<bool>,
}

impl SubmissionPage {
    pub fn has_next(&self) -> bool {
        self.has_next.unwrap_or(false)
    }
}

/// A solved problem, fully resolved from its summary and detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub submit_time: DateTime<Local>,
    pub package_name: String,
    pub link: String,
    pub description: String,
    pub solution: String,
    pub name: String,
    pub run_time: Duration,
    pub language: Language,
}

/// Converts a problem title into a lower camel case package segment, e.g. `Two Sum` to `twoSum`.
pub fn package_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len());
    let mut capitalize = false;

    for c in title.trim().to_lowercase().chars() {
        if c == ' ' {
            capitalize = !name.is_empty();
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if capitalize {
                name.push(c.to_ascii_uppercase());
                capitalize = false;
            } else {
                name.push(c);
            }
        }
    }

    if name.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    name
}

/// Parses run time text such as `52 ms` as milliseconds.
pub fn parse_run_time(text: &str) -> Result<Duration> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ExtractError::Parse(format!("run time `{}`", text)));
    }

    digits
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ExtractError::Parse(format!("run time `{}`", text)))
}
