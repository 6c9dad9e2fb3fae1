use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use tokio::sync::Mutex;
use tokio::time::{self, Instant};
use tracing::{debug, instrument};

use crate::config::FetchConfig;
use crate::error::Result;

/// Fetch collaborator for the pipeline: resolves a page name (one
/// wind-legality variant of one event) to the raw table text behind it.
/// Absence of a table is a value, not an error; the pipeline turns it into
/// "no data for this query" rather than aborting the run.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_table(&self, page: &str) -> Result<Option<String>>;
}

/// Spaces request starts across every task sharing one source, so a
/// concurrent catalogue run still hits the host at most once per delay
/// window. Callers reserve a start slot under the lock and wait for it
/// outside.
#[derive(Debug)]
struct RequestPacer {
    delay: Duration,
    next_free: Mutex<Instant>,
}

impl RequestPacer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_free: Mutex::new(Instant::now()),
        }
    }

    async fn pace(&self) {
        if self.delay.is_zero() {
            return;
        }
        let scheduled = {
            let mut next_free = self.next_free.lock().await;
            let scheduled = (*next_free).max(Instant::now());
            *next_free = scheduled + self.delay;
            scheduled
        };
        time::sleep_until(scheduled).await;
    }
}

/// Live source. Pages sit at `{base_url}/{page}.htm` and publish their
/// result table as a single `<pre>` block.
pub struct HttpTableSource {
    client: reqwest::Client,
    base_url: String,
    pacer: RequestPacer,
}

impl HttpTableSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            pacer: RequestPacer::new(Duration::from_millis(config.delay_ms)),
        })
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    #[instrument(skip(self))]
    async fn fetch_table(&self, page: &str) -> Result<Option<String>> {
        let url = format!("{}/{}.htm", self.base_url, page);
        debug!("Fetching {}", url);

        self.pacer.pace().await;
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No page at {}", url);
            return Ok(None);
        }
        let body = response.error_for_status()?.text().await?;

        Ok(extract_table_text(&body))
    }
}

/// Text of the first `<pre>` block in a page body. Pages without one carry
/// no result table.
fn extract_table_text(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("pre").unwrap();
    document
        .select(&selector)
        .next()
        .map(|pre| pre.text().collect::<String>())
}

/// In-memory source keyed by page name, for tests and offline runs.
#[derive(Debug, Default)]
pub struct StaticTableSource {
    pages: HashMap<String, String>,
}

impl StaticTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: &str, table: &str) -> Self {
        self.pages.insert(page.to_string(), table.to_string());
        self
    }
}

#[async_trait]
impl TableSource for StaticTableSource {
    async fn fetch_table(&self, page: &str) -> Result<Option<String>> {
        Ok(self.pages.get(page).cloned())
    }
}
