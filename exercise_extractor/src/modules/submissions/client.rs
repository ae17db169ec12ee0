use crate::{modules::submissions::crawler::SubmissionSource, types::SubmissionPage};
use async_trait::async_trait;
use exercise_extractor_libs::{ExtractError, Result};
use reqwest::{header::REFERER, Client, Url};
use scraper::{Html, Selector};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://leetcode.com";

/// Account used to sign in to the service.
#[derive(Debug)]
pub struct Credentials {
    pub user: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(user: &str, password: &str) -> Self {
        Self {
            user: user.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }
}

/// HTTP session against the service. Cookies set by the login are kept for every later request.
pub struct LeetCodeClient {
    base: Url,
    client: Client,
    csrf_token: Selector,
}

impl LeetCodeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base,
            client,
            csrf_token: Selector::parse(r#"input[name="csrfmiddlewaretoken"]"#).unwrap(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Signs in with the CSRF token taken from the login form.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let url = self.base.join("/accounts/login/")?;
        tracing::info!("Attempting to sign in to {} as {}", self.base, credentials.user);

        let res = self.client.get(url.clone()).send().await?;
        if let Err(e) = res.error_for_status_ref() {
            return Err(ExtractError::Authentication(format!(
                "login page returned an error response: {}",
                e
            )));
        }
        let html = res.text().await?;
        let token = self.extract_csrf_token(&html).ok_or_else(|| {
            ExtractError::Authentication(String::from("CSRF token not found in login page"))
        })?;

        let res = self
            .client
            .post(url.clone())
            .header(REFERER, url.as_str())
            .form(&[
                ("csrfmiddlewaretoken", token.as_str()),
                ("login", credentials.user.as_str()),
                ("password", credentials.password.expose_secret()),
            ])
            .send()
            .await?;
        if let Err(e) = res.error_for_status_ref() {
            return Err(ExtractError::Authentication(format!(
                "credentials of {} were rejected: {}",
                credentials.user, e
            )));
        }

        tracing::info!("Signed in as {}", credentials.user);
        Ok(())
    }

    fn extract_csrf_token(&self, html: &str) -> Option<String> {
        let html = Html::parse_document(html);
        html.select(&self.csrf_token)
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(String::from)
    }
}

#[async_trait]
impl SubmissionSource for LeetCodeClient {
    async fn fetch_page(&self, page: usize) -> Result<SubmissionPage> {
        let url = self.base.join(&format!("/api/submissions/my/{}/", page))?;
        let res = self
            .client
            .get(url)
            .query(&[("format", "json")])
            .send()
            .await?
            .error_for_status()?;
        let body = res.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_detail(&self, path: &str) -> Result<String> {
        let url = self.base.join(path)?;
        tracing::debug!("Fetch submission detail {}", url);
        let res = self.client.get(url).send().await?.error_for_status()?;

        Ok(res.text().await?)
    }
}
