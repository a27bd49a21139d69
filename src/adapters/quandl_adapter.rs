//! Quandl WIKI dataset fetch adapter.
//!
//! Downloads per-ticker CSV datasets over HTTP. The WIKI endpoint serves
//! the column layout the ingestion core expects, `Adj. Close` included.

use crate::domain::error::StockfeedError;
use crate::domain::instant::Instant;
use crate::ports::fetch_port::FetchPort;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.quandl.com/api/v3/datasets/WIKI";

pub struct QuandlAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl QuandlAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// `<base>/<TICKER>.csv?order=asc&api_key=<key>` plus the optional date
    /// window parameters.
    fn dataset_url(&self, symbol: &str, begin: Option<Instant>, end: Option<Instant>) -> String {
        let mut url = format!(
            "{}/{}.csv?order=asc&api_key={}",
            self.base_url, symbol, self.api_key
        );
        if let Some(begin) = begin {
            url.push_str(&format!("&start_date={begin}"));
        }
        if let Some(end) = end {
            url.push_str(&format!("&end_date={end}"));
        }
        url
    }
}

impl FetchPort for QuandlAdapter {
    fn fetch_csv(
        &self,
        symbol: &str,
        begin: Option<Instant>,
        end: Option<Instant>,
    ) -> Result<String, StockfeedError> {
        let fetch_err = |reason: String| StockfeedError::Fetch {
            symbol: symbol.to_string(),
            reason,
        };

        let url = self.dataset_url(symbol, begin, end);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| fetch_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_err(format!("HTTP {}", response.status())));
        }
        response.text().map_err(|e| fetch_err(e.to_string()))
    }
}

/// `dir/TICKER.<begin>.<end>.csv` when a full date window is present,
/// `dir/TICKER.csv` otherwise.
pub fn dataset_filename(
    dir: &Path,
    ticker: &str,
    begin: Option<Instant>,
    end: Option<Instant>,
) -> PathBuf {
    match (begin, end) {
        (Some(begin), Some(end)) => dir.join(format!("{ticker}.{begin}.{end}.csv")),
        _ => dir.join(format!("{ticker}.csv")),
    }
}

/// Create the dataset directory if it does not already exist.
pub fn init_dataset_dir(dir: &Path) -> Result<(), StockfeedError> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}
