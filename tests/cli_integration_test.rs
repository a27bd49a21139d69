//! Integration tests for the CLI helpers: config precedence, the piped
//! source list, and the fetch-to-directory pipeline.

mod common;

use common::*;
use std::fs;
use std::io::Cursor;
use stockfeed::adapters::file_config_adapter::FileConfigAdapter;
use stockfeed::cli::{fetch_to_dir, read_source_list, resolve_value_field};
use stockfeed::domain::error::StockfeedError;
use stockfeed::ports::config_port::ConfigPort;
use tempfile::TempDir;

mod value_field_resolution {
    use super::*;

    #[test]
    fn defaults_to_adjusted_close() {
        assert_eq!(resolve_value_field(None, None), "Adj. Close");
    }

    #[test]
    fn config_overrides_default() {
        let config = FileConfigAdapter::from_string("[data]\nvalue_field = Close\n").unwrap();
        assert_eq!(
            resolve_value_field(None, Some(&config as &dyn ConfigPort)),
            "Close"
        );
    }

    #[test]
    fn flag_overrides_config() {
        let config = FileConfigAdapter::from_string("[data]\nvalue_field = Close\n").unwrap();
        assert_eq!(
            resolve_value_field(Some("Open"), Some(&config as &dyn ConfigPort)),
            "Open"
        );
    }
}

mod source_list {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let input = "data/JPM.csv data/BAC.csv\ndata/GS.csv\n";
        let files = read_source_list(Cursor::new(input.as_bytes().to_vec())).unwrap();
        assert_eq!(files, vec!["data/JPM.csv", "data/BAC.csv", "data/GS.csv"]);
    }

    #[test]
    fn empty_input_yields_no_files() {
        let files = read_source_list(Cursor::new(Vec::new())).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let files = read_source_list(Cursor::new(b"a.csv\n\n\nb.csv\n".to_vec())).unwrap();
        assert_eq!(files, vec!["a.csv", "b.csv"]);
    }
}

mod fetch_pipeline {
    use super::*;

    #[test]
    fn writes_one_dataset_per_symbol() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new()
            .with_response("JPM", SAMPLE_CSV)
            .with_response("BAC", "date,Adj. Close\n2018-01-01,25.5\n");

        let symbols = vec!["JPM".to_string(), "BAC".to_string()];
        let paths = fetch_to_dir(
            &fetcher,
            &symbols,
            Some(day("2018-01-01")),
            Some(day("2018-04-01")),
            dir.path(),
        )
        .unwrap();

        assert_eq!(
            paths,
            vec![
                dir.path().join("JPM.2018-01-01.2018-04-01.csv"),
                dir.path().join("BAC.2018-01-01.2018-04-01.csv"),
            ]
        );
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), SAMPLE_CSV);
    }

    #[test]
    fn symbols_are_uppercased() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new().with_response("JPM", SAMPLE_CSV);

        let symbols = vec!["jpm".to_string()];
        let paths = fetch_to_dir(&fetcher, &symbols, None, None, dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("JPM.csv")]);
    }

    #[test]
    fn creates_the_dataset_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("datasets");
        let fetcher = MockFetcher::new().with_response("GS", SAMPLE_CSV);

        let symbols = vec!["GS".to_string()];
        fetch_to_dir(&fetcher, &symbols, None, None, &target).unwrap();
        assert!(target.join("GS.csv").is_file());
    }

    #[test]
    fn unknown_symbol_aborts_the_fetch() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();

        let symbols = vec!["XYZ".to_string()];
        assert!(matches!(
            fetch_to_dir(&fetcher, &symbols, None, None, dir.path()),
            Err(StockfeedError::Fetch { symbol, .. }) if symbol == "XYZ"
        ));
    }
}
