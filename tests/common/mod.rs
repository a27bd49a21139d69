#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, Cursor};
use stockfeed::domain::error::StockfeedError;
use stockfeed::domain::instant::Instant;
use stockfeed::ports::fetch_port::FetchPort;
use stockfeed::ports::source_port::SourcePort;

pub struct MockSourcePort {
    pub data: HashMap<String, String>,
    pub errors: HashMap<String, String>,
}

impl MockSourcePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_source(mut self, id: &str, content: &str) -> Self {
        self.data.insert(id.to_string(), content.to_string());
        self
    }

    pub fn with_error(mut self, id: &str, reason: &str) -> Self {
        self.errors.insert(id.to_string(), reason.to_string());
        self
    }
}

impl SourcePort for MockSourcePort {
    fn open(&self, id: &str) -> Result<Box<dyn BufRead>, StockfeedError> {
        if let Some(reason) = self.errors.get(id) {
            return Err(StockfeedError::SourceUnavailable {
                path: id.to_string(),
                reason: reason.clone(),
            });
        }
        match self.data.get(id) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone().into_bytes()))),
            None => Err(StockfeedError::SourceUnavailable {
                path: id.to_string(),
                reason: "not found".to_string(),
            }),
        }
    }
}

pub struct MockFetcher {
    pub responses: HashMap<String, String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub fn with_response(mut self, symbol: &str, csv: &str) -> Self {
        self.responses.insert(symbol.to_string(), csv.to_string());
        self
    }
}

impl FetchPort for MockFetcher {
    fn fetch_csv(
        &self,
        symbol: &str,
        _begin: Option<Instant>,
        _end: Option<Instant>,
    ) -> Result<String, StockfeedError> {
        self.responses
            .get(symbol)
            .cloned()
            .ok_or_else(|| StockfeedError::Fetch {
                symbol: symbol.to_string(),
                reason: "no dataset".to_string(),
            })
    }
}

pub fn day(text: &str) -> Instant {
    Instant::parse(text).unwrap()
}

pub const SAMPLE_CSV: &str = "date,Open,Adj. Close\n\
    2018-01-01,99.0,100.0\n\
    2018-01-02,100.5,101.5\n\
    2018-01-03,101.0,99.75\n";
