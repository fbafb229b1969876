//! CLI integration tests for chart command orchestration.
//!
//! Tests cover:
//! - Parameter resolution: config file values, flag overrides, validation
//! - Data directory resolution
//! - `--at` parsing
//! - Recent search history on disk
//! - Full pipeline from CSV files on disk to JSON output

mod common;

use common::*;
use stockchart::adapters::csv_adapter::CsvAdapter;
use stockchart::adapters::file_config_adapter::FileConfigAdapter;
use stockchart::cli::{
    self, build_chart_params, chart_to_json, parse_instant, prepare_chart, record_search, recent_searches,
    resolve_data_dir, resolve_recent_file, SourceArgs,
};
use stockchart::domain::chart::ChartParams;
use stockchart::domain::error::ChartError;
use std::io::Write;
use std::path::PathBuf;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[chart]
period = 3
tick_count = 4
max_points = 60

[data]
path = /srv/quotes

[search]
recent_file = /srv/recent.json
"#;

const AAPL_CSV: &str = "date,open,high,low,close,volume
2023-12-27,192.49,193.50,191.09,193.15,48087700
2023-12-28,194.14,194.66,193.17,193.58,34049900
2023-12-29,193.90,194.40,191.73,192.53,42628800
2024-01-02,187.15,188.44,183.89,185.64,82488700
2024-01-03,184.22,185.88,183.43,184.25,58414500
";

mod parameter_resolution {
    use super::*;

    #[test]
    fn config_values_are_used() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params = build_chart_params(&config, &SourceArgs::default()).unwrap();
        assert_eq!(
            params,
            ChartParams {
                period: 3,
                tick_count: 4,
                max_points: Some(60),
            }
        );
    }

    #[test]
    fn flags_override_config() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let source = SourceArgs {
            period: Some(20),
            ticks: Some(6),
            max_points: Some(30),
            ..SourceArgs::default()
        };
        let params = build_chart_params(&config, &source).unwrap();
        assert_eq!(params.period, 20);
        assert_eq!(params.tick_count, 6);
        assert_eq!(params.max_points, Some(30));
    }

    #[test]
    fn defaults_without_config() {
        let params = build_chart_params(&FileConfigAdapter::empty(), &SourceArgs::default()).unwrap();
        assert_eq!(params, ChartParams::default());
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let source = SourceArgs {
            ticks: Some(1),
            ..SourceArgs::default()
        };
        let err = build_chart_params(&FileConfigAdapter::empty(), &source).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter { ref name, .. } if name == "tick_count"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FileConfigAdapter::from_string("[chart]\nperiod = 0\n").unwrap();
        let err = build_chart_params(&config, &SourceArgs::default()).unwrap_err();
        assert!(matches!(err, ChartError::ConfigInvalid { .. }));
    }

    #[test]
    fn config_loaded_from_disk() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::load_config(file.path()).unwrap();
        let params = build_chart_params(&config, &SourceArgs::default()).unwrap();
        assert_eq!(params.period, 3);
    }

    #[test]
    fn missing_config_file() {
        let err = cli::load_config(&PathBuf::from("/nonexistent/chart.ini")).unwrap_err();
        assert!(matches!(err, ChartError::ConfigParse { .. }));
        assert_eq!(err.exit_status(), 2);
    }
}

mod data_dir_resolution {
    use super::*;

    #[test]
    fn flag_wins() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let source = SourceArgs {
            data_dir: Some(PathBuf::from("/tmp/override")),
            ..SourceArgs::default()
        };
        assert_eq!(resolve_data_dir(&config, &source), PathBuf::from("/tmp/override"));
    }

    #[test]
    fn config_path_next() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        assert_eq!(
            resolve_data_dir(&config, &SourceArgs::default()),
            PathBuf::from("/srv/quotes")
        );
    }

    #[test]
    fn working_directory_last() {
        assert_eq!(
            resolve_data_dir(&FileConfigAdapter::empty(), &SourceArgs::default()),
            PathBuf::from(".")
        );
    }
}

mod instant_parsing {
    use super::*;

    #[test]
    fn iso_date() {
        assert_eq!(parse_instant("2024-01-02").unwrap(), instant("2024-01-02"));
    }

    #[test]
    fn epoch_millis() {
        assert_eq!(parse_instant("1704153600000").unwrap(), 1_704_153_600_000.0);
    }

    #[test]
    fn garbage() {
        let err = parse_instant("yesterday").unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter { ref name, .. } if name == "at"));
    }
}

mod csv_pipeline {
    use super::*;

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("AAPL.csv"), AAPL_CSV).unwrap();
        dir
    }

    #[test]
    fn chart_from_csv() {
        let dir = data_dir();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let params = ChartParams {
            period: 3,
            tick_count: 3,
            max_points: None,
        };

        let chart = prepare_chart(&adapter, "aapl", &params).unwrap();
        assert_eq!(chart.symbol, "AAPL");
        assert_eq!(chart.points.len(), 5);
        assert!(chart.year_qualified());
        assert_eq!(chart.axis.tick_labels(), vec!["12/27/2023", "12/30/2023", "01/03/2024"]);
        assert!(chart.points.iter().all(|p| p.observation.is_consistent()));

        let tooltip = chart.tooltip_for(instant("2024-01-02")).unwrap();
        assert_eq!(tooltip.value_of("Close"), Some("$185.64"));
        assert_eq!(tooltip.value_of("Volume"), Some("82,488,700"));
        // (193.58 + 192.53 + 185.64) / 3
        assert_eq!(tooltip.value_of("MA"), Some("$190.58"));
    }

    #[test]
    fn json_output() {
        let dir = data_dir();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let chart = prepare_chart(&adapter, "AAPL", &ChartParams::default()).unwrap();

        let json = chart_to_json(&chart, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "AAPL");
        assert_eq!(value["period"], 10);
        assert_eq!(value["points"].as_array().unwrap().len(), 5);
        assert_eq!(value["points"][0]["timestamp"], 1_703_635_200_000.0);
        assert!(value["points"][0].get("moving_average").is_none());
        assert_eq!(value["axis"]["tick_count"], 5);
        assert_eq!(value["axis"]["label_granularity"], "year_qualified");
        assert_eq!(value["volume_range"]["max"], 82_488_700.0);
        assert!(value["invalid_dates"].as_array().unwrap().is_empty());
    }

    #[test]
    fn bad_dates_reach_the_output() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("XYZ.csv"),
            "date,close\n2024-01-02,10\n01/03/2024,11\n2024-01-04,12\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let chart = prepare_chart(&adapter, "XYZ", &ChartParams::default()).unwrap();
        assert_eq!(chart.invalid_dates.len(), 1);
        assert_eq!(chart.invalid_dates[0].raw, "01/03/2024");

        let value: serde_json::Value =
            serde_json::from_str(&chart_to_json(&chart, true).unwrap()).unwrap();
        assert!(value["points"][1]["timestamp"].is_null());
        assert_eq!(value["invalid_dates"][0]["index"], 1);
    }

    #[test]
    fn missing_symbol_file() {
        let dir = data_dir();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = prepare_chart(&adapter, "MSFT", &ChartParams::default()).unwrap_err();
        assert_eq!(err.exit_status(), 3);
    }
}

mod search_history {
    use super::*;

    #[test]
    fn recent_file_resolution() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        assert_eq!(
            resolve_recent_file(&config, &SourceArgs::default()),
            Some(PathBuf::from("/srv/recent.json"))
        );

        let source = SourceArgs {
            recent_file: Some(PathBuf::from("/tmp/mine.json")),
            ..SourceArgs::default()
        };
        assert_eq!(resolve_recent_file(&config, &source), Some(PathBuf::from("/tmp/mine.json")));
        assert_eq!(resolve_recent_file(&FileConfigAdapter::empty(), &SourceArgs::default()), None);
    }

    #[test]
    fn lookups_are_remembered_across_runs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("recent.json");

        assert!(recent_searches(&path).unwrap().is_empty());
        record_search(&path, "aapl").unwrap();
        record_search(&path, "TSLA").unwrap();
        let list = record_search(&path, "AAPL").unwrap();

        assert_eq!(list, vec!["AAPL", "TSLA"]);
        assert_eq!(recent_searches(&path).unwrap(), vec!["AAPL", "TSLA"]);
    }

    #[test]
    fn corrupt_history_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("recent.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = recent_searches(&path).unwrap_err();
        assert_eq!(err.exit_status(), 1);
    }
}
