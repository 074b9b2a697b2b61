//! Command-line interface for the Safar route safety engine.
//!
//! Three subcommands share one startup path (load the crime dataset, fit the
//! risk zones, build the spatial index) and print pretty JSON to stdout:
//!
//! - `zones` reports the fitted zones with their sizes and mean risk.
//! - `score` selects the safest of the candidate routes stored in a JSON file.
//! - `route` fetches route variants between two points from the routing
//!   service and selects the safest.
//!
//! Options layer CLI flags over `SAFAR_CMDS_<COMMAND>_*` environment variables
//! and configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use safar_engine::{DatasetConfig, Engine, EngineConfig, InitConfig, ZoneModelConfig, initialise};
use serde::Serialize;

mod error;
mod route;
mod score;
mod zones;

pub use error::CliError;

use route::RouteArgs;
use score::ScoreArgs;
use zones::ZonesArgs;

const ARG_DATASET: &str = "dataset";
const ARG_ZONES: &str = "zones";
const ARG_SEED: &str = "seed";
const ARG_CANDIDATES: &str = "candidates";
const ARG_FROM: &str = "from";
const ARG_TO: &str = "to";
const ARG_API_KEY: &str = "api-key";
const ARG_BASE_URL: &str = "base-url";
const ARG_MODE: &str = "mode";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";

const ENV_SCORE_CANDIDATES: &str = "SAFAR_CMDS_SCORE_CANDIDATES";
const ENV_ROUTE_FROM: &str = "SAFAR_CMDS_ROUTE_FROM";
const ENV_ROUTE_TO: &str = "SAFAR_CMDS_ROUTE_TO";
const ENV_ROUTE_API_KEY: &str = "SAFAR_CMDS_ROUTE_API_KEY";

/// Dataset read when `--dataset` is not given.
const DEFAULT_DATASET: &str = "crime.csv";

/// Run the Safar CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// engine cannot be built, or the command itself fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Zones(args) => zones::run_zones(args, &mut stdout),
        Command::Score(args) => score::run_score(args, &mut stdout),
        Command::Route(args) => route::run_route(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "safar",
    about = "Score and select routes by their exposure to recorded crime",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fit the risk zones and report their size and mean risk.
    Zones(ZonesArgs),
    /// Select the safest of a set of candidate routes.
    Score(ScoreArgs),
    /// Fetch route variants between two points and select the safest.
    Route(RouteArgs),
}

/// Dataset and zone settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModelConfig {
    dataset: Utf8PathBuf,
    zones: usize,
    seed: u64,
}

impl ModelConfig {
    fn resolve(dataset: Option<Utf8PathBuf>, zones: Option<usize>, seed: Option<u64>) -> Self {
        let defaults = ZoneModelConfig::default();
        Self {
            dataset: dataset.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATASET)),
            zones: zones.unwrap_or(defaults.zones),
            seed: seed.unwrap_or(defaults.seed),
        }
    }

    fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)
    }

    fn init_config(&self) -> InitConfig {
        let zones = ZoneModelConfig::default()
            .with_zones(self.zones)
            .with_seed(self.seed);
        InitConfig {
            dataset: DatasetConfig::default().with_min_rows(self.zones),
            engine: EngineConfig::default().with_zones(zones),
        }
    }

    fn build_engine(&self) -> Result<Engine, CliError> {
        Ok(initialise(&self.dataset, &self.init_config())?)
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match safar_data::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
