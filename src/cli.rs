use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use model::{BusinessType, Metric};

pub mod commands;

use commands::{print_series, print_settings, serve};

#[derive(Parser)]
#[command(name = "demandcast")]
#[command(about = "Demand forecasting dashboard API with deterministic mock data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Chart selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Revenue,
    Units,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Revenue => Metric::Revenue,
            MetricArg::Units => Metric::Units,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "DEMANDCAST_BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Settings file (YAML, TOML or JSON); `demandcast.*` is used when present
        #[arg(short, long, env = "DEMANDCAST_SETTINGS")]
        settings: Option<String>,

        /// Business type the session starts with
        #[arg(long, env = "DEMANDCAST_BUSINESS_TYPE", default_value = "convenience")]
        business_type: BusinessType,

        /// Date treated as today (YYYY-MM-DD), defaults to the current date
        #[arg(long, env = "DEMANDCAST_TODAY")]
        today: Option<NaiveDate>,
    },
    /// Print the effective settings as YAML
    Settings {
        /// Settings file (YAML, TOML or JSON)
        #[arg(short, long, env = "DEMANDCAST_SETTINGS")]
        settings: Option<String>,
    },
    /// Print one daily series as JSON
    Series {
        /// Which chart to print
        #[arg(value_enum, default_value = "revenue")]
        metric: MetricArg,

        /// First day (YYYY-MM-DD), defaults to a week before today
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day (YYYY-MM-DD), defaults to two weeks after `from`
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Comma separated store names, or `all`
        #[arg(long)]
        stores: Option<String>,

        /// Comma separated departments, or `all`
        #[arg(long)]
        departments: Option<String>,

        /// Attach "explain changes" annotations
        #[arg(long)]
        explain: bool,

        /// Settings file (YAML, TOML or JSON)
        #[arg(short, long, env = "DEMANDCAST_SETTINGS")]
        settings: Option<String>,

        /// Business type to generate for
        #[arg(long, env = "DEMANDCAST_BUSINESS_TYPE", default_value = "convenience")]
        business_type: BusinessType,

        /// Date treated as today (YYYY-MM-DD)
        #[arg(long, env = "DEMANDCAST_TODAY")]
        today: Option<NaiveDate>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                settings,
                business_type,
                today,
            } => {
                serve(&bind_address, settings.as_deref(), business_type, today).await?;
            }
            Commands::Settings { settings } => {
                print_settings(settings.as_deref())?;
            }
            Commands::Series {
                metric,
                from,
                to,
                stores,
                departments,
                explain,
                settings,
                business_type,
                today,
            } => {
                let query = commands::SeriesArgs {
                    metric: metric.into(),
                    from,
                    to,
                    stores,
                    departments,
                    explain,
                };
                print_series(query, settings.as_deref(), business_type, today)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "demandcast",
            "serve",
            "--bind-address",
            "127.0.0.1:8080",
            "--business-type",
            "liquor",
            "--today",
            "2026-01-08",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                bind_address,
                business_type,
                today,
                ..
            } => {
                assert_eq!(bind_address, "127.0.0.1:8080");
                assert_eq!(business_type, BusinessType::Liquor);
                assert_eq!(today, NaiveDate::from_ymd_opt(2026, 1, 8));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_series() {
        let cli = Cli::try_parse_from(["demandcast", "series", "units", "--explain", "--stores", "Airport Express"]).unwrap();
        match cli.command {
            Commands::Series {
                metric,
                explain,
                stores,
                ..
            } => {
                assert!(matches!(metric, MetricArg::Units));
                assert!(explain);
                assert_eq!(stores.as_deref(), Some("Airport Express"));
            }
            _ => panic!("expected series"),
        }
    }

    #[test]
    fn test_unknown_business_type_is_rejected() {
        assert!(Cli::try_parse_from(["demandcast", "serve", "--business-type", "bakery"]).is_err());
    }
}
