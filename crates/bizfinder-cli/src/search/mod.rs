//! The `search` command: run one aggregation, render it, export it.
//!
//! A provider failure is not fatal here. Whatever was gathered before the
//! failure is still rendered and exported, then the failure is reported on
//! stderr and surfaces as [`SearchStatus::Partial`].

mod export;
mod render;
mod xlsx;

use std::io::Write;
use std::path::PathBuf;

use bizfinder_core::{AppConfig, SearchRequest};
use bizfinder_maps::{aggregate, SerpMapsClient};
use clap::{Args, ValueEnum};

/// Smallest and largest result counts the command accepts.
pub(crate) const MIN_COUNT: usize = 5;
pub(crate) const MAX_COUNT: usize = 50;
pub(crate) const DEFAULT_COUNT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per business
    Table,
    /// A block of fields per business
    Detail,
    /// Pretty-printed JSON array
    Json,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Business type to search for (e.g. "coffee shop", "ร้านกาแฟ")
    pub query: String,

    /// Free-text area; overrides --province/--district
    #[arg(long, conflicts_with_all = ["province", "district"])]
    pub location: Option<String>,

    /// Province to search in
    #[arg(long)]
    pub province: Option<String>,

    /// District within --province
    #[arg(long, requires = "province")]
    pub district: Option<String>,

    /// Number of businesses wanted (clamped to 5..=50)
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// How to print results on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also write a CSV file; without a path a timestamped name is used
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub csv: Option<Option<PathBuf>>,

    /// Also write an Excel workbook; without a path a timestamped name is used
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub xlsx: Option<Option<PathBuf>>,

    /// Also write a JSON file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Complete,
    Partial,
}

/// Runs the `search` command.
///
/// # Errors
///
/// Returns an error if the query is empty, the client cannot be built, or
/// stdout/export writes fail. Provider failures are reported, not returned.
pub(crate) async fn run_search(
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<SearchStatus> {
    let location = compose_location(args, config);
    let count = clamp_count(args.count);
    let request = SearchRequest::new(&args.query, &location, count)?;
    let client = build_client(config)?;

    tracing::info!(
        query = %request.query(),
        location = %request.location(),
        count,
        "searching"
    );
    let outcome = aggregate(&client, &request).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if outcome.records.is_empty() {
        if outcome.error.is_none() {
            writeln!(
                out,
                "no results for '{}' in {}; try a different query",
                request.query(),
                request.location()
            )?;
        }
    } else {
        match args.format {
            OutputFormat::Table => render::write_table(&mut out, &outcome.records)?,
            OutputFormat::Detail => render::write_details(&mut out, &outcome.records)?,
            OutputFormat::Json => render::write_json(&mut out, &outcome.records)?,
        }
        if args.format != OutputFormat::Json {
            writeln!(
                out,
                "found {} businesses in {}",
                outcome.records.len(),
                request.location()
            )?;
        }
    }
    drop(out);

    let exported_at = chrono::Local::now();
    if let Some(csv_arg) = &args.csv {
        let path = csv_arg
            .clone()
            .unwrap_or_else(|| export::default_export_path(exported_at, "csv"));
        export::export_csv(&path, &outcome.records)?;
        eprintln!("wrote {} rows to {}", outcome.records.len(), path.display());
    }
    if let Some(xlsx_arg) = &args.xlsx {
        let path = xlsx_arg
            .clone()
            .unwrap_or_else(|| export::default_export_path(exported_at, "xlsx"));
        xlsx::export_xlsx(&path, &outcome.records)?;
        eprintln!("wrote {} rows to {}", outcome.records.len(), path.display());
    }
    if let Some(path) = &args.json {
        export::export_json(path, &outcome.records)?;
        eprintln!("wrote {} records to {}", outcome.records.len(), path.display());
    }

    if let Some(err) = &outcome.error {
        eprintln!(
            "warning: search stopped early ({err}); kept {} businesses gathered before the failure",
            outcome.records.len()
        );
        return Ok(SearchStatus::Partial);
    }

    Ok(SearchStatus::Complete)
}

fn build_client(config: &AppConfig) -> anyhow::Result<SerpMapsClient> {
    let client = match &config.api_base_url {
        Some(base_url) => SerpMapsClient::with_base_url(
            &config.serpapi_key,
            config.request_timeout_secs,
            &config.user_agent,
            base_url,
        ),
        None => SerpMapsClient::new(
            &config.serpapi_key,
            config.request_timeout_secs,
            &config.user_agent,
        ),
    };
    client.map_err(|e| anyhow::anyhow!("failed to build SerpApi client: {e}"))
}

/// Picks the search area: `--location`, else `"{district}, {province}"`,
/// else the province, else the configured default province and district
/// composed the same way, else `config.default_location`.
///
/// A configured default district is only used with the configured default
/// province, never with a `--province` flag.
fn compose_location(args: &SearchArgs, config: &AppConfig) -> String {
    let non_blank = |s: Option<&str>| {
        s.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    if let Some(location) = non_blank(args.location.as_deref()) {
        return location;
    }
    let (province, district) = match non_blank(args.province.as_deref()) {
        Some(province) => (Some(province), non_blank(args.district.as_deref())),
        None => (
            non_blank(config.default_province.as_deref()),
            non_blank(config.default_district.as_deref()),
        ),
    };
    match (province, district) {
        (Some(province), Some(district)) => format!("{district}, {province}"),
        (Some(province), None) => province,
        (None, _) => config.default_location.clone(),
    }
}

fn clamp_count(requested: usize) -> usize {
    let clamped = requested.clamp(MIN_COUNT, MAX_COUNT);
    if clamped != requested {
        tracing::info!(requested, clamped, "result count clamped");
    }
    clamped
}
