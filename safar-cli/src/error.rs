//! Error types emitted by the Safar CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use safar_data::routing::ProviderBuildError;
use safar_engine::{InitError, NoRouteFoundError};
use thiserror::Error;

/// Errors emitted by the Safar CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// A coordinate flag was not a valid `lat,lng` pair.
    #[error("{field} must be a `lat,lng` pair within range, got {value:?}")]
    InvalidCoordinate {
        /// Flag name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// Loading the dataset or fitting the engine failed.
    #[error("failed to initialise the route safety engine: {0}")]
    Initialise(#[from] InitError),
    /// Opening the candidate routes file failed.
    #[error("failed to open candidate routes at {path:?}: {source}")]
    OpenCandidates {
        /// Candidates file.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Candidate routes JSON could not be decoded.
    #[error("failed to parse candidate routes JSON at {path:?}: {source}")]
    ParseCandidates {
        /// Candidates file.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// No candidate route survived to be selected.
    #[error(transparent)]
    NoRoute(#[from] NoRouteFoundError),
    /// Constructing the routing provider failed.
    #[error("failed to build routing provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// Configured endpoint.
        base_url: String,
        /// Underlying failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime for route fetching could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
