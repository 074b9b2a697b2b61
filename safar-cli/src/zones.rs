//! `zones` command: report the fitted risk zones.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use safar_engine::Engine;
use serde::{Deserialize, Serialize};

use crate::{ARG_DATASET, ARG_SEED, ARG_ZONES, CliError, ModelConfig, write_json};

/// CLI arguments for the `zones` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the crime dataset, fit the risk zones and print each \
                 zone's incident count and mean risk weight as JSON.",
    about = "Report the fitted risk zones"
)]
#[ortho_config(prefix = "SAFAR")]
pub(crate) struct ZonesArgs {
    /// Path to the crime dataset CSV.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Number of risk zones to fit.
    #[arg(long = ARG_ZONES, value_name = "count")]
    #[serde(default)]
    pub(crate) zones: Option<usize>,
    /// Seed for centroid initialisation.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl ZonesArgs {
    fn into_config(self) -> Result<ModelConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(ModelConfig::from(merged))
    }
}

impl From<ZonesArgs> for ModelConfig {
    fn from(args: ZonesArgs) -> Self {
        Self::resolve(args.dataset, args.zones, args.seed)
    }
}

/// JSON payload printed by `zones`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ZoneReport {
    pub(crate) incidents: usize,
    pub(crate) inertia: f64,
    pub(crate) zones: Vec<ZoneRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct ZoneRow {
    pub(crate) zone: usize,
    pub(crate) incidents: usize,
    pub(crate) mean_risk: f64,
}

impl ZoneReport {
    fn from_engine(engine: &Engine) -> Self {
        let model = engine.zone_model();
        Self {
            incidents: engine.incident_count(),
            inertia: model.inertia(),
            zones: model
                .zones()
                .into_iter()
                .map(|summary| ZoneRow {
                    zone: summary.zone.index(),
                    incidents: summary.incidents,
                    mean_risk: summary.mean_risk,
                })
                .collect(),
        }
    }
}

pub(crate) fn run_zones(args: ZonesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_zones_with(&config, writer)
}

pub(crate) fn run_zones_with(config: &ModelConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    write_json(writer, &execute_zones(config)?)
}

pub(crate) fn execute_zones(config: &ModelConfig) -> Result<ZoneReport, CliError> {
    config.validate_sources()?;
    let engine = config.build_engine()?;
    Ok(ZoneReport::from_engine(&engine))
}
