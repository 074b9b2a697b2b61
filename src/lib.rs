//! Facade crate for the Safar route safety engine.
//!
//! This crate re-exports the domain types from the member crates and owns
//! the startup sequence: load the incident dataset, fit the risk zones, build
//! the spatial index, and publish the resulting [`Engine`] for concurrent
//! scoring.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use safar_engine::{EngineCell, InitConfig, initialise};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cell = EngineCell::new();
//! let engine = initialise(Utf8Path::new("data/crime.csv"), &InitConfig::default())?;
//! cell.install(engine);
//!
//! let score = cell.get()?.score_route(&[(28.61, 77.20), (28.62, 77.21)])?;
//! assert!((0.0..=100.0).contains(&score));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use std::sync::{Arc, OnceLock};

use camino::Utf8Path;
use thiserror::Error;

pub use safar_core::{
    CrimeIncident, DifferenceThresholds, FeatureVector, IncidentStore, RiskWeights,
    RouteCandidate, RouteFetchError, RoutePoint, RoutePreference, RouteProvider, RouteRequest,
    haversine_km, routes_differ,
};
pub use safar_data::{CsvLayout, DataLoadError, DatasetConfig, load_incidents, read_incidents};
pub use safar_scorer::{
    Engine, EngineConfig, NoRouteFoundError, RouteAssessment, ScoreCalibration, ScoreError,
    ScoredRoute, Selection,
};
pub use safar_zones::{ModelFitError, RiskZoneModel, ZoneId, ZoneModelConfig, ZoneSummary};

/// Startup configuration: how to read the dataset and how to build the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitConfig {
    /// Dataset layout, weights and minimum row count.
    pub dataset: DatasetConfig,
    /// Zone, index, calibration and selection settings.
    pub engine: EngineConfig,
}

impl Default for InitConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            dataset: DatasetConfig::default().with_min_rows(engine.zones.zones),
            engine,
        }
    }
}

/// Failures raised while bringing the engine up.
#[derive(Debug, Error)]
pub enum InitError {
    /// The dataset could not be read.
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    /// The zone model could not be fitted to the dataset.
    #[error(transparent)]
    ModelFit(#[from] ModelFitError),
}

/// Load the dataset at `path` and build a ready-to-score [`Engine`].
///
/// # Errors
/// Returns [`InitError::DataLoad`] when the dataset is missing or malformed
/// and [`InitError::ModelFit`] when it cannot support the configured zones.
pub fn initialise(path: &Utf8Path, config: &InitConfig) -> Result<Engine, InitError> {
    let incidents = load_incidents(path, &config.dataset)?;
    let engine = Engine::build(&incidents, &config.engine)?;
    log::info!(
        "route safety engine ready with {} incidents",
        engine.incident_count()
    );
    Ok(engine)
}

/// Scoring was requested before an engine was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("route safety engine is not initialised")]
pub struct EngineNotReady;

/// Process-wide slot for the shared [`Engine`].
///
/// The slot starts empty, accepts one engine, and hands out shared handles
/// afterwards. Readers never block.
#[derive(Debug, Default)]
pub struct EngineCell {
    slot: OnceLock<Arc<Engine>>,
}

impl EngineCell {
    /// Create an empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Publish `engine`, returning the handle now held by the cell.
    ///
    /// Only the first call installs; later calls leave the existing engine in
    /// place and return it.
    pub fn install(&self, engine: Engine) -> Arc<Engine> {
        Arc::clone(self.slot.get_or_init(|| Arc::new(engine)))
    }

    /// Whether an engine has been installed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Shared handle to the installed engine.
    ///
    /// # Errors
    /// Returns [`EngineNotReady`] until [`EngineCell::install`] has run.
    pub fn get(&self) -> Result<Arc<Engine>, EngineNotReady> {
        self.slot.get().map(Arc::clone).ok_or(EngineNotReady)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for engine start-up and readiness.

    use std::io::Write;

    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const HEADER: &str = "id,murder,rape,gangrape,robbery,theft,assault,harassment,total,area,lon,lat,ratio";

    /// Rows spread over two neighbourhoods with distinct crime mixes.
    const ROWS: [&str; 8] = [
        "1,3,1,0,0,1,2,1,0,a,77.200,28.600,0.4",
        "2,4,1,1,0,1,2,0,0,a,77.201,28.601,0.5",
        "3,3,2,0,0,0,3,1,0,a,77.202,28.602,0.3",
        "4,5,1,0,0,1,2,1,0,a,77.203,28.603,0.4",
        "5,0,0,0,4,20,0,0,0,b,77.350,28.700,0.1",
        "6,0,0,0,5,18,0,1,0,b,77.351,28.701,0.2",
        "7,0,0,0,3,22,0,0,0,b,77.352,28.702,0.1",
        "8,0,0,0,4,19,0,0,0,b,77.353,28.703,0.2",
    ];

    struct Dataset {
        _dir: TempDir,
        path: Utf8PathBuf,
    }

    #[fixture]
    fn dataset() -> Dataset {
        let dir = TempDir::new().expect("temporary directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("crime.csv")).expect("UTF-8 path");
        let mut file = std::fs::File::create(&path).expect("create dataset");
        writeln!(file, "{HEADER}").expect("write header");
        for row in ROWS {
            writeln!(file, "{row}").expect("write row");
        }
        Dataset { _dir: dir, path }
    }

    fn two_zones() -> InitConfig {
        let engine = EngineConfig::default().with_zones(ZoneModelConfig::default().with_zones(2));
        InitConfig {
            dataset: DatasetConfig::default().with_min_rows(2),
            engine,
        }
    }

    #[rstest]
    fn default_config_requires_one_row_per_zone() {
        let config = InitConfig::default();
        assert_eq!(config.dataset.min_rows, config.engine.zones.zones);
    }

    #[rstest]
    fn initialises_from_csv(dataset: Dataset) {
        let engine = initialise(&dataset.path, &two_zones()).expect("engine builds");
        assert_eq!(engine.incident_count(), ROWS.len());
        assert_eq!(engine.zone_model().zone_count(), 2);
    }

    #[rstest]
    fn short_dataset_is_rejected_before_fitting(dataset: Dataset) {
        let mut config = two_zones();
        config.dataset = config.dataset.with_min_rows(20);
        let err = initialise(&dataset.path, &config).expect_err("too few rows");
        assert!(matches!(
            err,
            InitError::DataLoad(DataLoadError::TooFewRows { rows: 8, required: 20 })
        ));
    }

    #[rstest]
    fn missing_dataset_is_a_load_error() {
        let err = initialise(Utf8Path::new("/nonexistent/crime.csv"), &two_zones())
            .expect_err("missing file");
        assert!(matches!(err, InitError::DataLoad(DataLoadError::Open { .. })));
    }

    #[rstest]
    fn cell_reports_not_ready_until_installed(dataset: Dataset) {
        let cell = EngineCell::new();
        assert!(!cell.is_ready());
        assert_eq!(cell.get().err(), Some(EngineNotReady));

        let engine = initialise(&dataset.path, &two_zones()).expect("engine builds");
        cell.install(engine);

        assert!(cell.is_ready());
        let score = cell
            .get()
            .expect("engine installed")
            .score_route(&[(28.601, 77.201), (28.700, 77.350)])
            .expect("route scores");
        assert!((0.0..=100.0).contains(&score));
    }

    #[rstest]
    fn second_install_keeps_first_engine(dataset: Dataset) {
        let cell = EngineCell::new();
        let first = cell.install(initialise(&dataset.path, &two_zones()).expect("engine builds"));
        let second = cell.install(initialise(&dataset.path, &two_zones()).expect("engine builds"));
        assert!(Arc::ptr_eq(&first, &second));
    }
}
