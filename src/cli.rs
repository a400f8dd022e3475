//! CLI definition and dispatch.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::line_prompt_adapter::LinePromptAdapter;
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::adapters::text_report::{render_backtest_report, render_plan_report};
use crate::domain::backtest::{compare_crossover_variants, BacktestConfig};
use crate::domain::config_validation::{
    validate_backtest_config, validate_config, validate_limits_config, validate_planner_config,
    validate_strategy_config,
};
use crate::domain::contribution::ContributionLimits;
use crate::domain::error::RothkitError;
use crate::domain::glide_path::glide_path;
use crate::domain::plan::{Plan, PlannerInput};
use crate::domain::strategy::{CrossoverParams, CrossoverVariant};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_history_port::PriceHistoryPort;
use crate::ports::prompt_port::PromptPort;

pub const DEFAULT_CHART_PATH: &str = "fidelity_allocation_strategy.svg";

/// Shown on stderr whenever planner input cannot be used.
pub const INVALID_INPUT_MESSAGE: &str =
    "Invalid input. Please enter numeric values where requested.";

#[derive(Parser, Debug)]
#[command(
    name = "rothkit",
    version,
    about = "Roth IRA contribution planner and SMA crossover backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan monthly Roth IRA contributions and fund allocation
    Plan {
        /// Current age
        #[arg(long)]
        age: Option<u32>,
        /// Start month (1-12)
        #[arg(long)]
        month: Option<u32>,
        /// Start year
        #[arg(long)]
        year: Option<i32>,
        /// Expected monthly contribution in dollars
        #[arg(long)]
        monthly: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Where to write the allocation chart
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Skip writing the allocation chart
        #[arg(long)]
        no_chart: bool,
    },
    /// Backtest the SMA crossover strategy on a CSV price history
    Backtest {
        /// Directory holding <TICKER>.csv files
        #[arg(long)]
        data: PathBuf,
        /// Ticker to load
        #[arg(long)]
        code: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// First date included (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// First date excluded (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Starting cash
        #[arg(long)]
        cash: Option<f64>,
        #[arg(long, value_enum, default_value_t = VariantArg::Both)]
        variant: VariantArg,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    Full,
    Half,
    /// Full and half side by side
    Both,
    /// Exit with `[strategy] exit_size`
    Configured,
}

impl VariantArg {
    pub fn variants(self) -> Vec<CrossoverVariant> {
        match self {
            VariantArg::Full => vec![CrossoverVariant::Full],
            VariantArg::Half => vec![CrossoverVariant::Half],
            VariantArg::Both => CrossoverVariant::ALL.to_vec(),
            VariantArg::Configured => vec![CrossoverVariant::Configured],
        }
    }
}

/// Planner values given on the command line; the rest are prompted for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlannerArgs {
    pub age: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub monthly: Option<f64>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Plan {
            age,
            month,
            year,
            monthly,
            config,
            chart,
            no_chart,
        } => {
            let args = PlannerArgs {
                age,
                month,
                year,
                monthly,
            };
            let chart = if no_chart {
                ChartTarget::Disabled
            } else {
                ChartTarget::Enabled(chart)
            };
            run_plan(args, config.as_deref(), chart)
        }
        Command::Backtest {
            data,
            code,
            config,
            start,
            end,
            cash,
            variant,
        } => run_backtest(
            &data,
            &code,
            config.as_deref(),
            BacktestOverrides { start, end, cash },
            variant,
        ),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    info!("loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|err| {
        error!("{err}");
        ExitCode::from(&err)
    })
}

/// Missing `--config` means built-in defaults.
fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(path) => load_config(path),
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn fail(err: &RothkitError) -> ExitCode {
    error!("{err}");
    err.into()
}

pub fn build_limits(adapter: &dyn ConfigPort) -> ContributionLimits {
    let defaults = ContributionLimits::default();
    ContributionLimits {
        standard: adapter.get_double("limits", "standard", defaults.standard),
        catch_up: adapter.get_double("limits", "catch_up", defaults.catch_up),
        catch_up_age: u32::try_from(adapter.get_int(
            "limits",
            "catch_up_age",
            i64::from(defaults.catch_up_age),
        ))
        .unwrap_or(defaults.catch_up_age),
    }
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, RothkitError> {
    let defaults = BacktestConfig::default();
    Ok(BacktestConfig {
        start_date: adapter.get_date("backtest", "start_date")?,
        end_date: adapter.get_date("backtest", "end_date")?,
        initial_cash: adapter.get_double("backtest", "initial_cash", defaults.initial_cash),
        commission_pct: adapter.get_double("backtest", "commission_pct", defaults.commission_pct),
        exclusive_orders: adapter.get_bool(
            "backtest",
            "exclusive_orders",
            defaults.exclusive_orders,
        ),
    })
}

pub fn build_crossover_params(adapter: &dyn ConfigPort) -> CrossoverParams {
    let defaults = CrossoverParams::default();
    let period = |key: &str, default: usize| {
        usize::try_from(adapter.get_int("strategy", key, default as i64)).unwrap_or(default)
    };
    CrossoverParams {
        fast_period: period("fast_period", defaults.fast_period),
        slow_period: period("slow_period", defaults.slow_period),
        entry_size: adapter.get_double("strategy", "entry_size", defaults.entry_size),
        exit_size: adapter.get_double("strategy", "exit_size", defaults.exit_size),
    }
}

/// Fill in missing planner values by prompting, in the order age, month,
/// year, monthly contribution.
pub fn collect_planner_input(
    prompt: &mut dyn PromptPort,
    args: PlannerArgs,
) -> Result<PlannerInput, RothkitError> {
    let age = match args.age {
        Some(age) => age,
        None => ask(prompt, "age", "Enter your current age: ")?,
    };
    let month = match args.month {
        Some(month) => month,
        None => ask(prompt, "start month", "Month (1-12): ")?,
    };
    let year = match args.year {
        Some(year) => year,
        None => ask(prompt, "start year", "Year: ")?,
    };
    let monthly = match args.monthly {
        Some(monthly) => monthly,
        None => ask(
            prompt,
            "monthly contribution",
            "Enter your expected monthly contribution ($): ",
        )?,
    };
    PlannerInput::new(age, month, year, monthly)
}

fn ask<T: FromStr>(prompt: &mut dyn PromptPort, field: &str, label: &str) -> Result<T, RothkitError> {
    let line = prompt
        .prompt(label)?
        .ok_or_else(|| RothkitError::invalid_input(field, "no input"))?;
    line.parse::<T>()
        .map_err(|_| RothkitError::invalid_input(field, format!("{line:?} is not a number")))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartTarget {
    Disabled,
    /// `None` falls back to `[planner] chart_path`, then the default file name.
    Enabled(Option<PathBuf>),
}

fn run_plan(args: PlannerArgs, config_path: Option<&Path>, chart: ChartTarget) -> ExitCode {
    let adapter = match load_optional_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_limits_config(&adapter).and_then(|_| validate_planner_config(&adapter))
    {
        return fail(&e);
    }
    let limits = build_limits(&adapter);

    println!("Roth IRA Dollar Cost Averaging Calculator");
    println!("{}", "=".repeat(50));

    let mut prompt = LinePromptAdapter::stdio();
    let input = match collect_planner_input(&mut prompt, args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{INVALID_INPUT_MESSAGE}");
            return fail(&e);
        }
    };

    let plan = Plan::build(input, &limits);
    info!(
        age = input.age,
        start = %input.start_date,
        monthly = input.monthly_contribution,
        "built contribution plan"
    );
    print!("{}", render_plan_report(&plan));

    let out = match chart {
        ChartTarget::Disabled => return ExitCode::SUCCESS,
        ChartTarget::Enabled(path) => path
            .or_else(|| adapter.get_string("planner", "chart_path").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_PATH)),
    };
    println!("\nGenerating allocation strategy chart...");
    write_chart(&SvgChartAdapter, input.age, &out);
    ExitCode::SUCCESS
}

/// Chart problems are reported but never fail the run.
pub fn write_chart(chart: &dyn ChartPort, age: u32, out: &Path) -> bool {
    match chart.write_allocation_chart(&glide_path(age), out) {
        Ok(()) => {
            println!("Chart saved as '{}'", out.display());
            true
        }
        Err(e) => {
            warn!("could not generate chart: {e}");
            false
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BacktestOverrides {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub cash: Option<f64>,
}

impl BacktestOverrides {
    pub fn apply(self, config: &mut BacktestConfig) -> Result<(), RothkitError> {
        if let Some(start) = self.start {
            config.start_date = Some(start);
        }
        if let Some(end) = self.end {
            config.end_date = Some(end);
        }
        if let Some(cash) = self.cash {
            if !cash.is_finite() || cash <= 0.0 {
                return Err(RothkitError::invalid_input("cash", "must be positive"));
            }
            config.initial_cash = cash;
        }
        if let (Some(start), Some(end)) = (config.start_date, config.end_date) {
            if start >= end {
                return Err(RothkitError::invalid_input(
                    "start",
                    format!("{start} is not before {end}"),
                ));
            }
        }
        Ok(())
    }
}

fn run_backtest(
    data_dir: &Path,
    code: &str,
    config_path: Option<&Path>,
    overrides: BacktestOverrides,
    variant: VariantArg,
) -> ExitCode {
    let adapter = match load_optional_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) =
        validate_backtest_config(&adapter).and_then(|_| validate_strategy_config(&adapter))
    {
        return fail(&e);
    }

    let mut bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    if let Err(e) = overrides.apply(&mut bt_config) {
        return fail(&e);
    }
    let params = build_crossover_params(&adapter);

    let data_port = CsvAdapter::new(data_dir.to_path_buf());
    match run_backtest_pipeline(&data_port, code, params, &variant.variants(), &bt_config) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Load `code`, run every requested variant and render the report.
pub fn run_backtest_pipeline(
    data_port: &dyn PriceHistoryPort,
    code: &str,
    params: CrossoverParams,
    variants: &[CrossoverVariant],
    bt_config: &BacktestConfig,
) -> Result<String, RothkitError> {
    let bars = data_port.fetch(code, bt_config.start_date, bt_config.end_date)?;
    info!(
        code,
        bars = bars.len(),
        start = ?bt_config.start_date,
        end = ?bt_config.end_date,
        "running backtest"
    );

    let results = compare_crossover_variants(code, &bars, params, variants, bt_config)?;
    for (variant, stats) in &results {
        info!(
            %variant,
            trades = stats.trades,
            return_ann_pct = stats.return_ann_pct,
            "variant finished"
        );
    }
    Ok(render_backtest_report(code, &results))
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(&e);
    }

    let limits = build_limits(&adapter);
    let params = build_crossover_params(&adapter);
    println!("Configuration is valid: {}", config_path.display());
    println!(
        "  limits: {} standard, {} from age {}",
        limits.standard, limits.catch_up, limits.catch_up_age
    );
    println!(
        "  strategy: SMA({}/{}), entry {:.0}%, exit {:.0}%",
        params.fast_period,
        params.slow_period,
        params.entry_size * 100.0,
        params.exit_size * 100.0
    );
    ExitCode::SUCCESS
}
