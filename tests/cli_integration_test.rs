//! CLI integration tests.
//!
//! Tests cover:
//! - Config parsing (build_limits, build_backtest_config, build_crossover_params)
//! - Planner input collection with flags and prompts
//! - Backtest overrides and the pipeline over MockPriceHistory
//! - Whole commands through `cli::run` with real files on disk

mod common;

use common::*;
use rothkit::adapters::file_config_adapter::FileConfigAdapter;
use rothkit::cli::{self, BacktestOverrides, Cli, Command, PlannerArgs, VariantArg};
use rothkit::domain::backtest::BacktestConfig;
use rothkit::domain::error::RothkitError;
use rothkit::domain::strategy::{CrossoverParams, CrossoverVariant};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn same_code(actual: ExitCode, expected: u8) -> bool {
    format!("{actual:?}") == format!("{:?}", ExitCode::from(expected))
}

const VALID_INI: &str = r#"
[limits]
standard = 7000
catch_up = 8000
catch_up_age = 50

[planner]
chart_path = allocation.svg

[backtest]
start_date = 2023-01-01
end_date = 2024-01-01
initial_cash = 25000
commission_pct = 0.1
exclusive_orders = false

[strategy]
fast_period = 5
slow_period = 15
entry_size = 0.5
exit_size = 1.0
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_limits_reads_section() {
        let adapter = FileConfigAdapter::from_string(
            "[limits]\nstandard = 7500\ncatch_up = 8600\ncatch_up_age = 55\n",
        )
        .unwrap();
        let limits = cli::build_limits(&adapter);
        assert_eq!(limits.standard, 7500.0);
        assert_eq!(limits.catch_up, 8600.0);
        assert_eq!(limits.catch_up_age, 55);
    }

    #[test]
    fn build_limits_defaults_to_2025() {
        let limits = cli::build_limits(&FileConfigAdapter::empty());
        assert_eq!(limits.standard, 7000.0);
        assert_eq!(limits.catch_up, 8000.0);
        assert_eq!(limits.catch_up_age, 50);
    }

    #[test]
    fn build_backtest_config_reads_section() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_backtest_config(&adapter).unwrap();
        assert_eq!(config.start_date, Some(date(2023, 1, 1)));
        assert_eq!(config.end_date, Some(date(2024, 1, 1)));
        assert_eq!(config.initial_cash, 25_000.0);
        assert_eq!(config.commission_pct, 0.1);
        assert!(!config.exclusive_orders);
    }

    #[test]
    fn build_backtest_config_defaults() {
        let config = cli::build_backtest_config(&FileConfigAdapter::empty()).unwrap();
        assert_eq!(config, BacktestConfig::default());
    }

    #[test]
    fn build_backtest_config_bad_date() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\nstart_date = 01/02/2023\n").unwrap();
        let err = cli::build_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, RothkitError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn build_crossover_params_reads_section() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params = cli::build_crossover_params(&adapter);
        assert_eq!(params.fast_period, 5);
        assert_eq!(params.slow_period, 15);
        assert_eq!(params.entry_size, 0.5);
        assert_eq!(params.exit_size, 1.0);
    }

    #[test]
    fn build_crossover_params_defaults() {
        let params = cli::build_crossover_params(&FileConfigAdapter::empty());
        assert_eq!(params, CrossoverParams::default());
    }

    #[test]
    fn load_config_missing_file_is_config_error() {
        let result = cli::load_config(&PathBuf::from("/nonexistent/rothkit.ini"));
        assert!(same_code(result.err().unwrap(), 2));
    }
}

mod planner_input {
    use super::*;

    #[test]
    fn prompts_for_everything_in_order() {
        let mut prompt = ScriptedPrompt::new(&["30", "3", "2025", "500"]);
        let input = cli::collect_planner_input(&mut prompt, PlannerArgs::default()).unwrap();

        assert_eq!(input.age, 30);
        assert_eq!(input.start_date, date(2025, 3, 1));
        assert_eq!(input.monthly_contribution, 500.0);
        assert_eq!(
            prompt.asked,
            vec![
                "Enter your current age: ",
                "Month (1-12): ",
                "Year: ",
                "Enter your expected monthly contribution ($): ",
            ]
        );
    }

    #[test]
    fn flags_skip_their_prompts() {
        let mut prompt = ScriptedPrompt::new(&["250.50"]);
        let args = PlannerArgs {
            age: Some(52),
            month: Some(7),
            year: Some(2025),
            monthly: None,
        };
        let input = cli::collect_planner_input(&mut prompt, args).unwrap();

        assert_eq!(input.age, 52);
        assert_eq!(input.monthly_contribution, 250.5);
        assert_eq!(prompt.asked.len(), 1);
    }

    #[test]
    fn non_numeric_answer_is_invalid_input() {
        let mut prompt = ScriptedPrompt::new(&["thirty"]);
        let err = cli::collect_planner_input(&mut prompt, PlannerArgs::default()).unwrap_err();
        assert!(matches!(err, RothkitError::InvalidInput { field, .. } if field == "age"));
    }

    #[test]
    fn end_of_input_is_invalid_input() {
        let mut prompt = ScriptedPrompt::new(&["30", "1"]);
        let err = cli::collect_planner_input(&mut prompt, PlannerArgs::default()).unwrap_err();
        assert!(matches!(err, RothkitError::InvalidInput { field, .. } if field == "start year"));
    }

    #[test]
    fn month_out_of_range_is_invalid_input() {
        let mut prompt = ScriptedPrompt::new(&["30", "13", "2025", "500"]);
        let err = cli::collect_planner_input(&mut prompt, PlannerArgs::default()).unwrap_err();
        assert!(matches!(err, RothkitError::InvalidInput { field, .. } if field == "start month"));
    }
}

mod overrides {
    use super::*;

    #[test]
    fn flags_replace_config_values() {
        let mut config = BacktestConfig::default();
        BacktestOverrides {
            start: Some(date(2022, 1, 1)),
            end: Some(date(2023, 1, 1)),
            cash: Some(5_000.0),
        }
        .apply(&mut config)
        .unwrap();

        assert_eq!(config.start_date, Some(date(2022, 1, 1)));
        assert_eq!(config.end_date, Some(date(2023, 1, 1)));
        assert_eq!(config.initial_cash, 5_000.0);
    }

    #[test]
    fn start_after_configured_end_is_rejected() {
        let mut config = BacktestConfig {
            end_date: Some(date(2022, 1, 1)),
            ..BacktestConfig::default()
        };
        let err = BacktestOverrides {
            start: Some(date(2022, 6, 1)),
            ..BacktestOverrides::default()
        }
        .apply(&mut config)
        .unwrap_err();
        assert!(matches!(err, RothkitError::InvalidInput { .. }));
    }

    #[test]
    fn non_positive_cash_is_rejected() {
        let mut config = BacktestConfig::default();
        let err = BacktestOverrides {
            cash: Some(0.0),
            ..BacktestOverrides::default()
        }
        .apply(&mut config)
        .unwrap_err();
        assert!(matches!(err, RothkitError::InvalidInput { field, .. } if field == "cash"));
    }

    #[test]
    fn variant_arg_expands() {
        assert_eq!(VariantArg::Full.variants(), vec![CrossoverVariant::Full]);
        assert_eq!(VariantArg::Half.variants(), vec![CrossoverVariant::Half]);
        assert_eq!(VariantArg::Both.variants(), CrossoverVariant::ALL.to_vec());
        assert_eq!(
            VariantArg::Configured.variants(),
            vec![CrossoverVariant::Configured]
        );
    }
}

mod pipeline {
    use super::*;

    #[test]
    fn renders_report_for_each_variant() {
        let data = MockPriceHistory::new().with_bars("FXAIX", wave_bars(200));
        let report = cli::run_backtest_pipeline(
            &data,
            "FXAIX",
            CrossoverParams::default(),
            &CrossoverVariant::ALL,
            &sample_config(),
        )
        .unwrap();

        assert!(report.contains("FXAIX - full exit"));
        assert!(report.contains("FXAIX - half exit"));
        assert!(report.contains("ANNUALIZED RETURN COMPARISON"));
        assert!(report.contains("Buy/Hold Return:"));
    }

    #[test]
    fn single_variant_report() {
        let data = MockPriceHistory::new().with_bars("FXAIX", wave_bars(120));
        let report = cli::run_backtest_pipeline(
            &data,
            "FXAIX",
            CrossoverParams::default(),
            &[CrossoverVariant::Half],
            &sample_config(),
        )
        .unwrap();

        assert!(report.contains("FXAIX - half exit"));
        assert!(!report.contains("full exit"));
    }

    #[test]
    fn configured_exit_size_reaches_engine() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nexit_size = 0.25\n").unwrap();
        let params = cli::build_crossover_params(&adapter);
        let data = MockPriceHistory::new().with_bars("FXAIX", wave_bars(120));
        let report = cli::run_backtest_pipeline(
            &data,
            "FXAIX",
            params,
            &VariantArg::Configured.variants(),
            &sample_config(),
        )
        .unwrap();

        assert!(report.contains("FXAIX - configured exit"));
        assert!(report.contains("SMA(10/20) crossover, exit 25%"));
        assert!(!report.contains("exit 100%"));
    }

    #[test]
    fn unknown_ticker_is_no_data() {
        let data = MockPriceHistory::new();
        let err = cli::run_backtest_pipeline(
            &data,
            "NOPE",
            CrossoverParams::default(),
            &CrossoverVariant::ALL,
            &sample_config(),
        )
        .unwrap_err();
        assert!(matches!(err, RothkitError::NoData { code } if code == "NOPE"));
    }

    #[test]
    fn window_outside_data_is_no_data() {
        let data = MockPriceHistory::new().with_bars("FXAIX", wave_bars(100));
        let config = BacktestConfig {
            start_date: Some(date(2030, 1, 1)),
            ..sample_config()
        };
        let err = cli::run_backtest_pipeline(
            &data,
            "FXAIX",
            CrossoverParams::default(),
            &CrossoverVariant::ALL,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, RothkitError::NoData { .. }));
    }

    #[test]
    fn short_history_is_insufficient_data() {
        let data = MockPriceHistory::new().with_bars("FXAIX", wave_bars(12));
        let err = cli::run_backtest_pipeline(
            &data,
            "FXAIX",
            CrossoverParams::default(),
            &CrossoverVariant::ALL,
            &sample_config(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RothkitError::InsufficientData {
                bars: 12,
                minimum: 21,
                ..
            }
        ));
    }

    #[test]
    fn data_error_propagates() {
        let data = MockPriceHistory::new().with_error("FXAIX", "corrupt file");
        let err = cli::run_backtest_pipeline(
            &data,
            "FXAIX",
            CrossoverParams::default(),
            &CrossoverVariant::ALL,
            &sample_config(),
        )
        .unwrap_err();
        assert!(matches!(err, RothkitError::Data { reason } if reason == "corrupt file"));
    }
}

mod commands {
    use super::*;

    #[test]
    fn plan_with_all_flags_writes_chart() {
        let dir = tempfile::tempdir().unwrap();
        let chart = dir.path().join("chart.svg");
        let code = cli::run(Cli {
            command: Command::Plan {
                age: Some(35),
                month: Some(1),
                year: Some(2025),
                monthly: Some(583.33),
                config: None,
                chart: Some(chart.clone()),
                no_chart: false,
            },
        });

        assert!(same_code(code, 0));
        let svg = std::fs::read_to_string(&chart).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Your Age: 35"));
    }

    #[test]
    fn plan_uses_chart_path_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let chart = dir.path().join("from_config.svg");
        let ini = write_temp_ini(&format!("[planner]\nchart_path = {}\n", chart.display()));
        let code = cli::run(Cli {
            command: Command::Plan {
                age: Some(60),
                month: Some(4),
                year: Some(2025),
                monthly: Some(800.0),
                config: Some(ini.path().to_path_buf()),
                chart: None,
                no_chart: false,
            },
        });

        assert!(same_code(code, 0));
        assert!(chart.exists());
    }

    #[test]
    fn plan_past_glide_path_still_writes_chart() {
        let dir = tempfile::tempdir().unwrap();
        let chart = dir.path().join("late.svg");
        let code = cli::run(Cli {
            command: Command::Plan {
                age: Some(85),
                month: Some(1),
                year: Some(2025),
                monthly: Some(500.0),
                config: None,
                chart: Some(chart.clone()),
                no_chart: false,
            },
        });

        assert!(same_code(code, 0));
        let svg = std::fs::read_to_string(&chart).unwrap();
        assert!(svg.contains("Stock vs Bond Allocation + Expense Ratio Trend"));
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn plan_chart_failure_still_succeeds() {
        let code = cli::run(Cli {
            command: Command::Plan {
                age: Some(30),
                month: Some(1),
                year: Some(2025),
                monthly: Some(500.0),
                config: None,
                chart: Some(PathBuf::from("/nonexistent/dir/chart.svg")),
                no_chart: false,
            },
        });
        assert!(same_code(code, 0));
    }

    #[test]
    fn plan_invalid_month_exits_3() {
        let code = cli::run(Cli {
            command: Command::Plan {
                age: Some(30),
                month: Some(0),
                year: Some(2025),
                monthly: Some(500.0),
                config: None,
                chart: None,
                no_chart: true,
            },
        });
        assert!(same_code(code, 3));
    }

    #[test]
    fn plan_bad_limits_exit_2() {
        let ini = write_temp_ini("[limits]\nstandard = -1\n");
        let code = cli::run(Cli {
            command: Command::Plan {
                age: Some(30),
                month: Some(1),
                year: Some(2025),
                monthly: Some(500.0),
                config: Some(ini.path().to_path_buf()),
                chart: None,
                no_chart: true,
            },
        });
        assert!(same_code(code, 2));
    }

    #[test]
    fn backtest_reads_csv_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("FXAIX.csv"), bars_to_csv(&wave_bars(150))).unwrap();
        let code = cli::run(Cli {
            command: Command::Backtest {
                data: dir.path().to_path_buf(),
                code: "FXAIX".into(),
                config: None,
                start: None,
                end: None,
                cash: Some(20_000.0),
                variant: VariantArg::Both,
            },
        });
        assert!(same_code(code, 0));
    }

    #[test]
    fn backtest_missing_csv_exits_5() {
        let dir = tempfile::tempdir().unwrap();
        let code = cli::run(Cli {
            command: Command::Backtest {
                data: dir.path().to_path_buf(),
                code: "MISSING".into(),
                config: None,
                start: None,
                end: None,
                cash: None,
                variant: VariantArg::Full,
            },
        });
        assert!(same_code(code, 5));
    }

    #[test]
    fn backtest_reversed_window_exits_3() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("FXAIX.csv"), bars_to_csv(&wave_bars(50))).unwrap();
        let code = cli::run(Cli {
            command: Command::Backtest {
                data: dir.path().to_path_buf(),
                code: "FXAIX".into(),
                config: None,
                start: Some(date(2024, 1, 1)),
                end: Some(date(2023, 1, 1)),
                cash: None,
                variant: VariantArg::Both,
            },
        });
        assert!(same_code(code, 3));
    }

    #[test]
    fn backtest_bad_strategy_config_exits_2() {
        let dir = tempfile::tempdir().unwrap();
        let ini = write_temp_ini("[strategy]\nfast_period = 30\nslow_period = 20\n");
        let code = cli::run(Cli {
            command: Command::Backtest {
                data: dir.path().to_path_buf(),
                code: "FXAIX".into(),
                config: Some(ini.path().to_path_buf()),
                start: None,
                end: None,
                cash: None,
                variant: VariantArg::Both,
            },
        });
        assert!(same_code(code, 2));
    }

    #[test]
    fn validate_accepts_full_config() {
        let ini = write_temp_ini(VALID_INI);
        let code = cli::run(Cli {
            command: Command::Validate {
                config: ini.path().to_path_buf(),
            },
        });
        assert!(same_code(code, 0));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let ini = write_temp_ini("[backtest]\ncommission_pct = 150\n");
        let code = cli::run(Cli {
            command: Command::Validate {
                config: ini.path().to_path_buf(),
            },
        });
        assert!(same_code(code, 2));
    }

    #[test]
    fn validate_missing_file_exits_2() {
        let code = cli::run(Cli {
            command: Command::Validate {
                config: PathBuf::from("/nonexistent/rothkit.ini"),
            },
        });
        assert!(same_code(code, 2));
    }
}
