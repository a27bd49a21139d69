//! Filesystem source adapter.

use crate::domain::error::StockfeedError;
use crate::ports::source_port::SourcePort;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Opens source identifiers as filesystem paths, optionally resolved under
/// a base directory (the dataset directory written by `fetch`).
#[derive(Default)]
pub struct FileSourceAdapter {
    base_path: Option<PathBuf>,
}

impl FileSourceAdapter {
    /// Identifiers are used as paths verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers are resolved relative to `base_path`.
    pub fn with_base<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    fn resolve(&self, id: &str) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(id),
            None => PathBuf::from(id),
        }
    }

    /// Tickers of the `*.csv` datasets cached under the base directory.
    ///
    /// Dataset filenames are `TICKER.<begin>.<end>.csv`; the ticker is the
    /// leading dot-separated segment. Sorted, duplicates collapsed.
    pub fn list_datasets(&self) -> Result<Vec<String>, StockfeedError> {
        let dir = self.base_path.clone().unwrap_or_else(|| PathBuf::from("."));
        let entries = fs::read_dir(&dir).map_err(|e| StockfeedError::SourceUnavailable {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                let ticker = stem.split('.').next().unwrap_or(stem);
                if !ticker.is_empty() {
                    tickers.push(ticker.to_string());
                }
            }
        }

        tickers.sort();
        tickers.dedup();
        Ok(tickers)
    }
}

impl SourcePort for FileSourceAdapter {
    fn open(&self, id: &str) -> Result<Box<dyn BufRead>, StockfeedError> {
        let path = self.resolve(id);
        let file = File::open(&path).map_err(|e| StockfeedError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}
