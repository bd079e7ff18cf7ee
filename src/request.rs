use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::{Error, Result};

/// Anything that can hand back the HTML behind a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get_html(&self, url: &str) -> Result<String>;
}

/// The live site, reached through a single `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Builds the one client used for the whole run. No timeout is set.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    /// Requests a page and returns its body, treating any non-2xx status as an error.
    async fn get_html(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                url: url.into(),
                status: status.as_u16(),
            });
        }
        let html = res.text().await?;
        Ok(html)
    }
}

pub fn landing_url(base_url: &str) -> String {
    format!("{base_url}/")
}

pub fn courses_url(base_url: &str, term: &str, department_id: &str) -> String {
    format!("{base_url}/{term}/{department_id}")
}

pub fn sections_url(base_url: &str, term: &str, course_id: &str) -> String {
    format!("{base_url}/{term}/sections?courseIds={course_id}")
}
