//! `route` command: fetch route variants between two points and select the
//! safest.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use safar_core::{RoutePoint, RoutePreference, RouteProvider, RouteRequest};
use safar_data::routing::{HttpRouteProvider, HttpRouteProviderConfig, fetch_candidates};
use safar_engine::Selection;
use serde::{Deserialize, Serialize};

use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_DATASET, ARG_FROM, ARG_MODE, ARG_SEED, ARG_TIMEOUT_SECS, ARG_TO,
    ARG_ZONES, CliError, ENV_ROUTE_API_KEY, ENV_ROUTE_FROM, ENV_ROUTE_TO, ModelConfig, write_json,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Request the balanced, short and less-maneuvers variants \
                 between two points from the routing service, collapse \
                 near-duplicates, score the rest against the crime dataset \
                 and print the safest route alongside all scored routes.",
    about = "Fetch and rank routes between two points"
)]
#[ortho_config(prefix = "SAFAR")]
pub(crate) struct RouteArgs {
    /// Start point as `lat,lng`.
    #[arg(long = ARG_FROM, value_name = "lat,lng")]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// End point as `lat,lng`.
    #[arg(long = ARG_TO, value_name = "lat,lng")]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// Routing service API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Routing service endpoint.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Travel mode, e.g. `drive` or `walk`.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<String>,
    /// Per-variant timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
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

impl RouteArgs {
    fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct RouteConfig {
    pub(crate) request: RouteRequest,
    pub(crate) provider: HttpRouteProviderConfig,
    pub(crate) model: ModelConfig,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let from = args.from.ok_or(CliError::MissingArgument {
            field: ARG_FROM,
            env: ENV_ROUTE_FROM,
        })?;
        let to = args.to.ok_or(CliError::MissingArgument {
            field: ARG_TO,
            env: ENV_ROUTE_TO,
        })?;
        let api_key = args.api_key.ok_or(CliError::MissingArgument {
            field: ARG_API_KEY,
            env: ENV_ROUTE_API_KEY,
        })?;

        let mut provider = HttpRouteProviderConfig::new(api_key);
        if let Some(base_url) = args.base_url {
            provider = provider.with_base_url(base_url);
        }
        if let Some(mode) = args.mode {
            provider = provider.with_mode(mode);
        }
        if let Some(secs) = args.timeout_secs {
            provider = provider.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            request: RouteRequest::new(
                parse_coordinate(ARG_FROM, &from)?,
                parse_coordinate(ARG_TO, &to)?,
            ),
            provider,
            model: ModelConfig::resolve(args.dataset, args.zones, args.seed),
        })
    }
}

/// Parse a `lat,lng` pair into a validated point.
pub(crate) fn parse_coordinate(field: &'static str, value: &str) -> Result<RoutePoint, CliError> {
    let invalid = || CliError::InvalidCoordinate {
        field,
        value: value.to_owned(),
    };
    let (raw_lat, raw_lng) = value.split_once(',').ok_or_else(invalid)?;
    let lat = raw_lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let lng = raw_lng.trim().parse::<f64>().map_err(|_| invalid())?;
    RoutePoint::new(lat, lng).map_err(|_| invalid())
}

/// JSON payload printed by `route`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RouteReport {
    pub(crate) selection: Selection,
    pub(crate) failures: Vec<VariantFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct VariantFailure {
    pub(crate) preference: &'static str,
    pub(crate) error: String,
}

pub(crate) fn run_route(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.model.validate_sources()?;
    let provider = HttpRouteProvider::with_config(config.provider.clone()).map_err(|source| {
        CliError::BuildRouteProvider {
            base_url: config.provider.base_url.clone(),
            source,
        }
    })?;
    run_route_with(&config, &provider, writer)
}

pub(crate) fn run_route_with(
    config: &RouteConfig,
    provider: &dyn RouteProvider,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    write_json(writer, &execute_route(config, provider)?)
}

pub(crate) fn execute_route(
    config: &RouteConfig,
    provider: &dyn RouteProvider,
) -> Result<RouteReport, CliError> {
    let engine = config.model.build_engine()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let outcome = runtime.block_on(fetch_candidates(
        provider,
        &config.request,
        &RoutePreference::ALL,
        config.provider.timeout,
    ));
    let failures = outcome
        .failures
        .iter()
        .map(|(preference, err)| VariantFailure {
            preference: preference.as_str(),
            error: err.to_string(),
        })
        .collect();
    let selection = engine.select_safest(outcome.candidates)?;
    Ok(RouteReport {
        selection,
        failures,
    })
}
