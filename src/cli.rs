//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_source_adapter::FileSourceAdapter;
use crate::adapters::quandl_adapter::{self, QuandlAdapter};
use crate::domain::cursor::RowCursor;
use crate::domain::error::StockfeedError;
use crate::domain::instant::Instant;
use crate::domain::series::{read_price_data, VALUE_FIELD};
use crate::domain::sync::sync_to_date;
use crate::ports::config_port::ConfigPort;
use crate::ports::fetch_port::FetchPort;
use crate::ports::source_port::SourcePort;

#[derive(Parser, Debug)]
#[command(
    name = "stockfeed",
    about = "Fetch and ingest delimited stock price data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download datasets from the remote provider
    Fetch {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// File containing the provider API key
        #[arg(short, long)]
        key_file: Option<PathBuf>,
        /// Beginning date, YYYY-MM-DD
        #[arg(short, long)]
        begin: Option<String>,
        /// Ending date, YYYY-MM-DD
        #[arg(short, long)]
        end: Option<String>,
        /// Dataset directory; omit to stream to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Stock symbols to fetch
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Read price series from delimited source files
    Load {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Beginning date, YYYY-MM-DD
        #[arg(short, long)]
        begin: String,
        /// Ending date, YYYY-MM-DD
        #[arg(short, long)]
        end: String,
        /// Header label of the value column
        #[arg(long)]
        field: Option<String>,
        /// Source files; when omitted, the list is read from stdin
        files: Vec<String>,
    },
    /// List datasets cached in the dataset directory
    List {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Show where each source first reaches a begin date
    Info {
        /// Beginning date, YYYY-MM-DD
        #[arg(short, long)]
        begin: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Fetch {
            config,
            key_file,
            begin,
            end,
            output,
            symbols,
        } => run_fetch(
            config.as_ref(),
            key_file.as_ref(),
            begin.as_deref(),
            end.as_deref(),
            output.as_ref(),
            &symbols,
        ),
        Command::Load {
            config,
            begin,
            end,
            field,
            files,
        } => run_load(config.as_ref(), &begin, &end, field.as_deref(), &files),
        Command::List { config, dir } => run_list(config.as_ref(), dir.as_ref()),
        Command::Info { begin, files } => run_info(&begin, &files),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StockfeedError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<Option<FileConfigAdapter>, ExitCode> {
    match path {
        Some(path) => load_config(path).map(Some),
        None => Ok(None),
    }
}

fn config_get(config: Option<&FileConfigAdapter>, section: &str, key: &str) -> Option<String> {
    config.and_then(|c| c.get_string(section, key))
}

fn parse_date_arg(text: &str) -> Result<Instant, ExitCode> {
    Instant::parse(text).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn parse_optional_date(text: Option<&str>) -> Result<Option<Instant>, ExitCode> {
    match text {
        Some(text) => parse_date_arg(text).map(Some),
        None => Ok(None),
    }
}

/// Whitespace-separated source identifiers, as piped from `fetch`.
pub fn read_source_list<R: BufRead>(reader: R) -> Result<Vec<String>, StockfeedError> {
    let mut files = Vec::new();
    for line in reader.lines() {
        for token in line?.split_whitespace() {
            files.push(token.to_string());
        }
    }
    Ok(files)
}

/// Value-field label: flag wins over config, config over the default.
pub fn resolve_value_field(flag: Option<&str>, config: Option<&dyn ConfigPort>) -> String {
    if let Some(field) = flag {
        return field.to_string();
    }
    config
        .and_then(|c| c.get_string("data", "value_field"))
        .unwrap_or_else(|| VALUE_FIELD.to_string())
}

/// Fetch every symbol into the dataset directory, returning written paths
/// in symbol order. Symbols are uppercased. The first failure aborts.
pub fn fetch_to_dir(
    fetcher: &dyn FetchPort,
    symbols: &[String],
    begin: Option<Instant>,
    end: Option<Instant>,
    dir: &Path,
) -> Result<Vec<PathBuf>, StockfeedError> {
    quandl_adapter::init_dataset_dir(dir)?;

    let mut written = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let ticker = symbol.to_uppercase();
        let csv = fetcher.fetch_csv(&ticker, begin, end)?;
        let path = quandl_adapter::dataset_filename(dir, &ticker, begin, end);
        fs::write(&path, &csv)?;
        written.push(path);
    }
    Ok(written)
}

fn resolve_api_key(
    key_file: Option<&PathBuf>,
    config: Option<&FileConfigAdapter>,
) -> Result<String, ExitCode> {
    if let Some(path) = key_file {
        return read_key_file(path);
    }
    if let Some(key) = config_get(config, "quandl", "api_key") {
        return Ok(key);
    }
    if let Some(path) = config_get(config, "quandl", "api_key_file") {
        return read_key_file(Path::new(&path));
    }
    let err = StockfeedError::ConfigMissing {
        section: "quandl".into(),
        key: "api_key".into(),
    };
    eprintln!("error: {err}");
    Err(ExitCode::from(&err))
}

fn read_key_file(path: &Path) -> Result<String, ExitCode> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let err = StockfeedError::from(e);
            eprintln!(
                "error: failed to read api key file {}: {err}",
                path.display()
            );
            return Err(ExitCode::from(&err));
        }
    };
    let key = content.trim().to_string();
    if key.is_empty() {
        eprintln!("error: api key file {} is empty", path.display());
        return Err(ExitCode::from(2));
    }
    Ok(key)
}

fn run_fetch(
    config_path: Option<&PathBuf>,
    key_file: Option<&PathBuf>,
    begin: Option<&str>,
    end: Option<&str>,
    output: Option<&PathBuf>,
    symbols: &[String],
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let api_key = match resolve_api_key(key_file, config.as_ref()) {
        Ok(key) => key,
        Err(code) => return code,
    };
    let begin = match parse_optional_date(begin) {
        Ok(begin) => begin,
        Err(code) => return code,
    };
    let end = match parse_optional_date(end) {
        Ok(end) => end,
        Err(code) => return code,
    };

    let base_url = config_get(config.as_ref(), "quandl", "base_url")
        .unwrap_or_else(|| quandl_adapter::DEFAULT_BASE_URL.to_string());
    let fetcher = QuandlAdapter::with_base_url(&api_key, &base_url);

    let output = output
        .cloned()
        .or_else(|| config_get(config.as_ref(), "data", "database").map(PathBuf::from));

    match output {
        Some(dir) => {
            eprintln!("Fetching {} symbols into {}", symbols.len(), dir.display());
            match fetch_to_dir(&fetcher, symbols, begin, end, &dir) {
                Ok(paths) => {
                    for path in &paths {
                        println!("{}", path.display());
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::from(&e)
                }
            }
        }
        None => {
            for symbol in symbols {
                let ticker = symbol.to_uppercase();
                eprintln!("Fetching {ticker}...");
                let csv = match fetcher.fetch_csv(&ticker, begin, end) {
                    Ok(csv) => csv,
                    Err(e) => {
                        eprintln!("error: {e}");
                        return ExitCode::from(&e);
                    }
                };
                // bracket each dataset so a downstream reader can tell them apart
                println!("begin:{ticker}");
                print!("{csv}");
                if !csv.ends_with('\n') {
                    println!();
                }
                println!("end:{ticker}");
            }
            ExitCode::SUCCESS
        }
    }
}

fn run_load(
    config_path: Option<&PathBuf>,
    begin: &str,
    end: &str,
    field: Option<&str>,
    files: &[String],
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let begin = match parse_date_arg(begin) {
        Ok(begin) => begin,
        Err(code) => return code,
    };
    let end = match parse_date_arg(end) {
        Ok(end) => end,
        Err(code) => return code,
    };

    let field = resolve_value_field(field, config.as_ref().map(|c| c as &dyn ConfigPort));

    let files: Vec<String> = if files.is_empty() {
        match read_source_list(io::stdin().lock()) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        }
    } else {
        files.to_vec()
    };
    if files.is_empty() {
        eprintln!("error: no source files given");
        return ExitCode::from(2);
    }

    eprintln!("Reading {} sources, {} to {}", files.len(), begin, end);

    let sources = FileSourceAdapter::new();
    match read_price_data(&sources, &files, &field) {
        Ok(series) => {
            for s in &series {
                eprintln!("  {}: {} prices", s.source, s.prices.len());
            }
            eprintln!("Loaded {} series", series.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_list(config_path: Option<&PathBuf>, dir: Option<&PathBuf>) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let dir = match dir
        .cloned()
        .or_else(|| config_get(config.as_ref(), "data", "database").map(PathBuf::from))
    {
        Some(dir) => dir,
        None => {
            let err = StockfeedError::ConfigMissing {
                section: "data".into(),
                key: "database".into(),
            };
            eprintln!("error: {err}");
            return ExitCode::from(&err);
        }
    };

    let adapter = FileSourceAdapter::with_base(&dir);
    match adapter.list_datasets() {
        Ok(tickers) => {
            if tickers.is_empty() {
                eprintln!("No datasets found in {}", dir.display());
            } else {
                for ticker in &tickers {
                    println!("{ticker}");
                }
                eprintln!("{} datasets found", tickers.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_info(begin: &str, files: &[String]) -> ExitCode {
    let begin = match parse_date_arg(begin) {
        Ok(begin) => begin,
        Err(code) => return code,
    };

    let sources = FileSourceAdapter::new();
    for file in files {
        let reader = match sources.open(file) {
            Ok(reader) => reader,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        };

        let mut cursor = RowCursor::new(reader);
        match sync_to_date(&mut cursor, begin) {
            Ok(Some(date)) => {
                let mut rows = 0usize;
                loop {
                    match cursor.next_row() {
                        Ok(Some(_)) => rows += 1,
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("error: {file}: {e}");
                            return ExitCode::from(&e);
                        }
                    }
                }
                println!("{file}: {rows} rows from {date}");
            }
            Ok(None) => {
                println!("{file}: no rows on or after {begin}");
            }
            Err(e) => {
                eprintln!("error: {file}: {e}");
                return ExitCode::from(&e);
            }
        }
    }
    ExitCode::SUCCESS
}
