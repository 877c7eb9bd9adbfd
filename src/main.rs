use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use saju::calendar::solar_to_lunar;
use saju::tables::{self, Tables};
use saju::{
    BirthRecord, Calculator, ChartConfig, Config, ConfigError, Date, FlatChart, FourPillars,
    LunarDate, SajuError, ZiHourRollover,
};

#[derive(Parser)]
#[command(name = "saju", version, about = "Four Pillars chart of a birth date")]
struct Cli {
    /// Birth date, YYYY-MM-DD
    #[arg(value_parser = parse_date)]
    date: (i32, u32, u32),
    /// Birth time, HH:MM
    #[arg(value_parser = parse_time)]
    time: (u32, u32),
    /// DATE is a lunar date
    #[arg(long)]
    lunar: bool,
    /// The lunar month is a leap month
    #[arg(long, requires = "lunar")]
    leap_month: bool,
    /// Day rollover for 23:00-23:59; overrides the config file
    #[arg(long, value_enum)]
    zi_hour: Option<ZiHourRollover>,
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the eight symbols flat instead of nested pillars
    #[arg(long)]
    flat: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("[{code}] {err}", code = .0.code(), err = .0)]
    Chart(#[from] SajuError),
    #[error("no 子-hour rule: pass --zi-hour or set chart.zi_hour in the config file")]
    NoZiHour,
    #[error("calendar tables already installed")]
    TablesInstalled,
    #[error("cannot write output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(untagged)]
enum ChartOutput {
    Nested(FourPillars),
    Flat(FlatChart),
}

#[derive(Serialize)]
struct SolarTermOutput {
    name: &'static str,
    since: String,
    days: i32,
}

#[derive(Serialize)]
struct Report {
    chart: ChartOutput,
    text: String,
    hangul: String,
    lunar: Option<LunarDate>,
    lunar_name: Option<String>,
    solar_term: Option<SolarTermOutput>,
    zi_hour: ZiHourRollover,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);
    match run(&cli) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "failed");
            eprintln!("error: {e}");
            match e {
                CliError::Chart(e) if e.is_client_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = cli.config.as_ref().map(Config::from_file).transpose()?;
    let zi_hour = cli
        .zi_hour
        .or(config.as_ref().map(|c| c.chart.zi_hour))
        .ok_or(CliError::NoZiHour)?;
    let tables: &Tables = match &config {
        Some(c) if c.tables.is_some() => c
            .load_tables()?
            .install()
            .map_err(|_| CliError::TablesInstalled)?,
        _ => tables::global(),
    };

    let (year, month, day) = cli.date;
    let (hour, minute) = cli.time;
    let birth = if cli.lunar {
        BirthRecord::lunar(LunarDate::new(year, month, day, cli.leap_month), hour, minute)
    } else {
        BirthRecord::solar(year, month, day, hour, minute)
    };
    let chart = Calculator::new(tables, ChartConfig::new(zi_hour)).calculate(&birth)?;

    let date = Date::from_ymd(chart.solar.year, chart.solar.month, chart.solar.day);
    let lunar = date.and_then(|d| solar_to_lunar(tables, d).ok());
    let solar_term = date
        .and_then(|d| tables.solar_term_for(d).ok())
        .map(|(term, days)| SolarTermOutput {
            name: term.name(),
            since: term.at.to_string(),
            days,
        });
    let report = Report {
        text: chart.to_string(),
        hangul: chart.pillars().map(|p| p.hangul()).join(" "),
        chart: if cli.flat {
            ChartOutput::Flat(chart.to_flat())
        } else {
            ChartOutput::Nested(chart)
        },
        lunar_name: lunar.map(|l| l.name()),
        lunar,
        solar_term,
        zi_hour,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("saju=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("saju=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// `YYYY-MM-DD`; only the shape is checked here, the calendar checks the rest.
fn parse_date(s: &str) -> Result<(i32, u32, u32), String> {
    let parts: Vec<&str> = s.split('-').collect();
    let [y, m, d] = parts[..] else {
        return Err(format!("expected YYYY-MM-DD, got {s}"));
    };
    let year = y.parse().map_err(|e| format!("year {y:?}: {e}"))?;
    let month = m.parse().map_err(|e| format!("month {m:?}: {e}"))?;
    let day = d.parse().map_err(|e| format!("day {d:?}: {e}"))?;
    Ok((year, month, day))
}

/// `HH:MM`
fn parse_time(s: &str) -> Result<(u32, u32), String> {
    let (h, m) = s
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got {s}"))?;
    let hour = h.parse().map_err(|e| format!("hour {h:?}: {e}"))?;
    let minute = m.parse().map_err(|e| format!("minute {m:?}: {e}"))?;
    Ok((hour, minute))
}
