// src/scraper/fetch.rs

use chrono::NaiveDate;
use rand::Rng;
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::storage::snapshot_file_name;

use super::scraper_error::ScrapeError;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

const MAX_ATTEMPTS: u64 = 5;
const MAX_BACKOFF_SECS: u64 = 10;
const JITTER_MAX_SECS: u64 = 2;

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetches the listing page, retrying with linear backoff plus jitter.
    pub fn fetch_listing_page(&self, url: &Url) -> Result<String, ScrapeError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch(url) {
                Ok(html) => {
                    eprintln!("✅ page fetched on attempt {attempt}");
                    return Ok(html);
                }
                Err(e) => {
                    eprintln!("⚠️ fetch attempt {attempt} failed: {e}");
                    last_err = Some(e);

                    let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                    std::thread::sleep(Duration::from_secs(base + jitter));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| ScrapeError::Network("fetch retry loop failed".to_string())))
    }

    fn try_fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        if !status.is_success() {
            let head: String = text.chars().take(200).collect();
            return Err(ScrapeError::Network(format!("HTTP {status}: {head}")));
        }

        Ok(text)
    }

    /// Downloads today's capture into the snapshot folder under the dated
    /// file name. An already-present file is kept as-is, so re-running the
    /// job on the same day does not refetch.
    pub fn download_to_folder(
        &self,
        url: &Url,
        folder: &Path,
        date: NaiveDate,
    ) -> Result<PathBuf, ScrapeError> {
        let path = folder.join(snapshot_file_name(date));
        if path.exists() {
            eprintln!("snapshot {} already present, keeping it", path.display());
            return Ok(path);
        }

        let html = self.fetch_listing_page(url)?;
        std::fs::write(&path, html).map_err(|e| ScrapeError::Io(e.to_string()))?;
        eprintln!("snapshot saved to {}", path.display());
        Ok(path)
    }
}
