//! Design constants for zone fitting.

/// Parameters controlling [`crate::RiskZoneModel::fit`].
///
/// # Examples
/// ```
/// use safar_zones::ZoneModelConfig;
///
/// let config = ZoneModelConfig::default().with_seed(7);
/// assert_eq!(config.zones, 6);
/// assert_eq!(config.seed, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneModelConfig {
    /// Number of zones `K`.
    pub zones: usize,
    /// Upper bound on assignment/update rounds per restart.
    pub max_iterations: usize,
    /// Independent seeded restarts; the lowest-inertia result wins.
    pub restarts: usize,
    /// Seed for the pseudo-random centroid initialisation.
    pub seed: u64,
}

impl ZoneModelConfig {
    /// Default number of zones.
    pub const DEFAULT_ZONES: usize = 6;
    /// Default iteration cap per restart.
    pub const DEFAULT_MAX_ITERATIONS: usize = 300;
    /// Default number of restarts.
    pub const DEFAULT_RESTARTS: usize = 10;
    /// Default seed.
    pub const DEFAULT_SEED: u64 = 42;

    /// Override the zone count.
    #[must_use]
    pub const fn with_zones(mut self, zones: usize) -> Self {
        self.zones = zones;
        self
    }

    /// Override the iteration cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Override the restart count.
    #[must_use]
    pub const fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Override the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for ZoneModelConfig {
    fn default() -> Self {
        Self {
            zones: Self::DEFAULT_ZONES,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            restarts: Self::DEFAULT_RESTARTS,
            seed: Self::DEFAULT_SEED,
        }
    }
}
