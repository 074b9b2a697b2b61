//! `score` command: select the safest of a set of stored candidate routes.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use safar_core::RouteCandidate;
use safar_data::open_utf8_file;
use safar_engine::Selection;
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CANDIDATES, ARG_DATASET, ARG_SEED, ARG_ZONES, CliError, ENV_SCORE_CANDIDATES, ModelConfig,
    require_existing, write_json,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every route in a JSON array of candidates \
                 (`points` as [lat, lng] pairs, `distance_km`, \
                 `duration_min`), drop near-duplicates and print the \
                 safest route alongside all scored routes.",
    about = "Select the safest of a set of candidate routes"
)]
#[ortho_config(prefix = "SAFAR")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file containing candidate routes.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) candidates: Option<Utf8PathBuf>,
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

impl ScoreArgs {
    fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    pub(crate) candidates: Utf8PathBuf,
    pub(crate) model: ModelConfig,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.candidates, ARG_CANDIDATES)?;
        self.model.validate_sources()
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let candidates = args.candidates.ok_or(CliError::MissingArgument {
            field: ARG_CANDIDATES,
            env: ENV_SCORE_CANDIDATES,
        })?;
        Ok(Self {
            candidates,
            model: ModelConfig::resolve(args.dataset, args.zones, args.seed),
        })
    }
}

pub(crate) fn run_score(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_score_with(&config, writer)
}

pub(crate) fn run_score_with(config: &ScoreConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    write_json(writer, &execute_score(config)?)
}

pub(crate) fn execute_score(config: &ScoreConfig) -> Result<Selection, CliError> {
    config.validate_sources()?;
    let candidates = load_candidates(&config.candidates)?;
    let engine = config.model.build_engine()?;
    Ok(engine.select_safest(candidates)?)
}

/// Loads a JSON array of [`RouteCandidate`] values from disk.
pub(crate) fn load_candidates(path: &Utf8Path) -> Result<Vec<RouteCandidate>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenCandidates {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseCandidates {
        path: path.to_path_buf(),
        source,
    })
}
