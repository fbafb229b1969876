//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_file_store::JsonFileStore;
use crate::domain::chart::{build_chart, ChartData, ChartParams};
use crate::domain::config_validation::{chart_params_from_config, validate_chart_config};
use crate::domain::error::ChartError;
use crate::domain::format::{price_axis_label, volume_axis_label};
use crate::domain::observation::RawDate;
use crate::domain::recent_searches::RecentSearches;
use crate::domain::timestamp::to_instant;
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;

#[derive(Parser, Debug)]
#[command(name = "stockchart", about = "Prepare stock price history for charting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where history comes from and how the chart is shaped. Flags override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding `<SYMBOL>.csv` files
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// Moving average window
    #[arg(long)]
    pub period: Option<usize>,
    /// Number of time axis ticks
    #[arg(long)]
    pub ticks: Option<usize>,
    /// Downsample history to at most this many points
    #[arg(long)]
    pub max_points: Option<usize>,
    /// JSON file remembering recently charted symbols
    #[arg(long)]
    pub recent_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build chart data for a symbol and print it as JSON
    Chart {
        #[arg(short, long)]
        symbol: String,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the tooltip for the point nearest to a date or epoch-millisecond instant
    Tooltip {
        #[arg(short, long)]
        symbol: String,
        #[arg(long)]
        at: String,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        json: bool,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List recently charted symbols, most recent first
    Recent {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Validate a chart configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Chart {
            symbol,
            source,
            pretty,
        } => run_chart(&symbol, &source, pretty),
        Command::Tooltip {
            symbol,
            at,
            source,
            json,
        } => run_tooltip(&symbol, &at, &source, json),
        Command::ListSymbols { source } => run_list_symbols(&source),
        Command::Recent { source } => run_recent(&source),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ChartError> {
    log::info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| ChartError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ChartError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Config file values first, then command-line overrides, validated as a whole.
pub fn build_chart_params(config: &dyn ConfigPort, source: &SourceArgs) -> Result<ChartParams, ChartError> {
    let mut params = chart_params_from_config(config)?;
    if let Some(period) = source.period {
        params.period = period;
    }
    if let Some(ticks) = source.ticks {
        params.tick_count = ticks;
    }
    if source.max_points.is_some() {
        params.max_points = source.max_points;
    }
    params.validate()?;
    Ok(params)
}

/// `--data-dir`, else `[data] path`, else the working directory.
pub fn resolve_data_dir(config: &dyn ConfigPort, source: &SourceArgs) -> PathBuf {
    if let Some(dir) = &source.data_dir {
        return dir.clone();
    }
    config
        .get_string("data", "path")
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `--recent-file`, else `[search] recent_file`; `None` disables search history.
pub fn resolve_recent_file(config: &dyn ConfigPort, source: &SourceArgs) -> Option<PathBuf> {
    if let Some(path) = &source.recent_file {
        return Some(path.clone());
    }
    config
        .get_string("search", "recent_file")
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

/// Moves `symbol` to the front of the history stored at `path` and saves it.
pub fn record_search(path: &Path, symbol: &str) -> Result<Vec<String>, ChartError> {
    let mut recent = RecentSearches::new(JsonFileStore::open(path)?);
    let symbols = recent.record(symbol);
    recent.into_inner().save()?;
    Ok(symbols)
}

pub fn recent_searches(path: &Path) -> Result<Vec<String>, ChartError> {
    Ok(RecentSearches::new(JsonFileStore::open(path)?).list())
}

/// Records a successful lookup. Write failures are logged, not returned.
fn remember(config: &dyn ConfigPort, source: &SourceArgs, symbol: &str) {
    let Some(path) = resolve_recent_file(config, source) else {
        return;
    };
    if let Err(e) = record_search(&path, symbol) {
        log::warn!("Could not update {}: {}", path.display(), e);
    }
}

/// Fetches history and builds the chart, reporting dates that could not be read.
pub fn prepare_chart(
    history: &dyn HistoryPort,
    symbol: &str,
    params: &ChartParams,
) -> Result<ChartData, ChartError> {
    let series = history.fetch_history(symbol)?;
    log::info!(
        "Building chart for {} from {} observations",
        series.symbol,
        series.observations.len()
    );

    let chart = build_chart(&series, params)?;
    for invalid in &chart.invalid_dates {
        log::warn!("{}: {}", chart.symbol, invalid);
    }
    Ok(chart)
}

/// Parses `--at`: epoch milliseconds or an ISO-8601 date.
pub fn parse_instant(input: &str) -> Result<f64, ChartError> {
    to_instant(&RawDate::from_text(input)).ok_or_else(|| {
        ChartError::invalid_parameter("at", format!("cannot parse {:?} as a date or instant", input))
    })
}

pub fn chart_to_json(chart: &ChartData, pretty: bool) -> Result<String, ChartError> {
    let json = if pretty {
        serde_json::to_string_pretty(chart)?
    } else {
        serde_json::to_string(chart)?
    };
    Ok(json)
}

fn run_chart(symbol: &str, source: &SourceArgs, pretty: bool) -> Result<(), ChartError> {
    let config = load_optional_config(source.config.as_ref())?;
    let params = build_chart_params(&config, source)?;
    let adapter = CsvAdapter::new(resolve_data_dir(&config, source));

    let chart = prepare_chart(&adapter, symbol, &params)?;
    if let Some(range) = chart.price_range {
        log::info!(
            "Price range {} to {}",
            price_axis_label(range.min),
            price_axis_label(range.max)
        );
    }
    if let Some(range) = chart.volume_range {
        log::info!("Volume up to {}", volume_axis_label(range.max));
    }

    println!("{}", chart_to_json(&chart, pretty)?);
    remember(&config, source, &chart.symbol);
    Ok(())
}

fn run_tooltip(symbol: &str, at: &str, source: &SourceArgs, json: bool) -> Result<(), ChartError> {
    let instant = parse_instant(at)?;
    let config = load_optional_config(source.config.as_ref())?;
    let params = build_chart_params(&config, source)?;
    let adapter = CsvAdapter::new(resolve_data_dir(&config, source));

    let chart = prepare_chart(&adapter, symbol, &params)?;
    let tooltip = chart.tooltip_for(instant).ok_or_else(|| ChartError::NoData {
        symbol: chart.symbol.clone(),
    })?;

    if json {
        println!("{}", serde_json::to_string(&tooltip)?);
    } else {
        print!("{}", tooltip);
    }
    remember(&config, source, &chart.symbol);
    Ok(())
}

fn run_list_symbols(source: &SourceArgs) -> Result<(), ChartError> {
    let config = load_optional_config(source.config.as_ref())?;
    let adapter = CsvAdapter::new(resolve_data_dir(&config, source));
    for symbol in adapter.list_symbols()? {
        println!("{}", symbol);
    }
    Ok(())
}

fn run_recent(source: &SourceArgs) -> Result<(), ChartError> {
    let config = load_optional_config(source.config.as_ref())?;
    let Some(path) = resolve_recent_file(&config, source) else {
        return Err(ChartError::invalid_parameter(
            "recent_file",
            "set --recent-file or [search] recent_file",
        ));
    };
    for symbol in recent_searches(&path)? {
        println!("{}", symbol);
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), ChartError> {
    let config = load_config(config_path)?;
    validate_chart_config(&config)?;
    let params = chart_params_from_config(&config)?;

    eprintln!("Chart configuration is valid.");
    eprintln!("  period:     {}", params.period);
    eprintln!("  tick_count: {}", params.tick_count);
    match params.max_points {
        Some(n) => eprintln!("  max_points: {}", n),
        None => eprintln!("  max_points: (no downsampling)"),
    }
    eprintln!("  data path:  {}", resolve_data_dir(&config, &SourceArgs::default()).display());
    match resolve_recent_file(&config, &SourceArgs::default()) {
        Some(path) => eprintln!("  recent:     {}", path.display()),
        None => eprintln!("  recent:     (not recorded)"),
    }
    Ok(())
}
