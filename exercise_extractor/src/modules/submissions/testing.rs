//! Fixtures shared by the submission tests.
use crate::{
    modules::submissions::crawler::SubmissionSource,
    types::{SubmissionPage, SubmissionSummary},
};
use async_trait::async_trait;
use exercise_extractor_libs::{ExtractError, Result};
use std::{collections::HashMap, sync::Mutex};

/// Escapes source code the way the detail page embeds it.
pub fn escape_source(source: &str) -> String {
    source
        .encode_utf16()
        .map(|unit| match char::from_u32(unit.into()) {
            Some(c) if c.is_ascii_alphanumeric() || c == ' ' => c.to_string(),
            _ => format!("\\u{:04X}", unit),
        })
        .collect()
}

/// Builds a detail page with the page data in the eighth `<script>` block.
pub fn detail_page(slug: &str, description: Option<&str>, solution: &str) -> String {
    let meta = description
        .map(|description| format!(r#"<meta name="description" content="{}">"#, description))
        .unwrap_or_default();
    let scripts = (0..7)
        .map(|i| format!("<script>var block{} = {};</script>", i, i))
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Submission Detail</title>
{meta}
{scripts}
<script>
var pageData = {{
    questionId: '1',
    submissionCode: '{code}',
    editCodeUrl: '/problems/{slug}/',
}};
</script>
</head>
<body>
<a href="/submissions/">Back</a>
<a href="/problems/{slug}/">Problem</a>
</body>
</html>"#,
        meta = meta,
        scripts = scripts,
        code = escape_source(solution),
        slug = slug,
    )
}

pub fn summary(title: &str, status: &str, lang: &str, runtime: &str, time: &str, url: &str) -> SubmissionSummary {
    SubmissionSummary {
        title: title.to_string(),
        status_display: status.to_string(),
        lang: lang.to_string(),
        runtime: runtime.to_string(),
        time: time.to_string(),
        url: url.to_string(),
    }
}

/// In-memory listing. Pages past the end repeat `tail` forever.
pub struct FakeSource {
    pub pages: Vec<SubmissionPage>,
    pub tail: Option<SubmissionPage>,
    pub details: HashMap<String, String>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(pages: Vec<SubmissionPage>) -> Self {
        Self {
            pages,
            tail: None,
            details: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn detail(mut self, path: &str, html: String) -> Self {
        self.details.insert(path.to_string(), html);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionSource for FakeSource {
    async fn fetch_page(&self, page: usize) -> Result<SubmissionPage> {
        self.requests.lock().unwrap().push(format!("page {}", page));
        self.pages
            .get(page - 1)
            .or(self.tail.as_ref())
            .cloned()
            .ok_or_else(|| ExtractError::NotFound(format!("listing page {}", page)))
    }

    async fn fetch_detail(&self, path: &str) -> Result<String> {
        self.requests.lock().unwrap().push(path.to_string());
        self.details
            .get(path)
            .cloned()
            .ok_or_else(|| ExtractError::NotFound(format!("detail page {}", path)))
    }
}
