//! Inverse-distance risk aggregation around a query point.
//!
//! Incidents are bulk-loaded into an R\*-tree keyed by `[lng, lat]`. A query
//! first collects the incidents inside a bounding box that encloses the
//! search circle, then applies the exact haversine cut-off. Near the poles or
//! the antimeridian, where such a box is awkward, every incident is scanned.
//! Either way the contributions are summed in load order, so the result is
//! identical to a linear scan of the dataset.

use std::f64::consts::FRAC_PI_2;

use geo::Coord;
use rstar::{AABB, RTree, RTreeObject};
use safar_core::{EARTH_RADIUS_KM, IncidentStore, RoutePoint, haversine_km};

/// Search parameters for [`SpatialRiskIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskIndexConfig {
    /// Incidents further than this from the query point are ignored.
    pub radius_km: f64,
}

impl RiskIndexConfig {
    /// Default search radius.
    pub const DEFAULT_RADIUS_KM: f64 = 2.0;

    /// Override the search radius.
    #[must_use]
    pub const fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }
}

impl Default for RiskIndexConfig {
    fn default() -> Self {
        Self {
            radius_km: Self::DEFAULT_RADIUS_KM,
        }
    }
}

/// Relative slack added to the bounding box so rounding never excludes an
/// incident that the exact test would keep.
const ENVELOPE_MARGIN: f64 = 1.01;

#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedIncident {
    position: usize,
    location: [f64; 2],
    risk: f64,
}

impl IndexedIncident {
    const fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.location[0],
            y: self.location[1],
        }
    }
}

impl RTreeObject for IndexedIncident {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.location)
    }
}

/// Read-only spatial view of the incident store used on the scoring path.
///
/// # Examples
/// ```
/// use safar_core::test_support::{incident_with_risk, point};
/// use safar_core::IncidentStore;
/// use safar_scorer::{RiskIndexConfig, SpatialRiskIndex};
///
/// let store: IncidentStore = [incident_with_risk(28.6, 77.2, 10.0)].into_iter().collect();
/// let index = SpatialRiskIndex::new(&store, &RiskIndexConfig::default());
///
/// // An incident at the query point contributes its full risk.
/// assert_eq!(index.point_risk(&point(28.6, 77.2)), 10.0);
/// // Nothing lies within 2 km of Mumbai.
/// assert_eq!(index.point_risk(&point(19.07, 72.87)), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SpatialRiskIndex {
    tree: RTree<IndexedIncident>,
    radius_km: f64,
}

impl SpatialRiskIndex {
    /// Index every incident in `store`.
    #[must_use]
    pub fn new(store: &IncidentStore, config: &RiskIndexConfig) -> Self {
        let entries = store
            .iter()
            .enumerate()
            .map(|(position, incident)| IndexedIncident {
                position,
                location: [incident.lng(), incident.lat()],
                risk: incident.risk_weight(),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            radius_km: config.radius_km,
        }
    }

    /// Mean of `risk_weight * 1 / (1 + 2d)` over incidents within the radius,
    /// where `d` is the haversine distance in kilometres. Returns `0.0` when
    /// no incident is in range.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "point risk is a weighted mean over nearby incidents"
    )]
    pub fn point_risk(&self, point: &RoutePoint) -> f64 {
        let origin = Coord::from(*point);
        let mut nearby: Vec<(usize, f64)> = self
            .candidates(point)
            .into_iter()
            .filter_map(|entry| {
                let distance = haversine_km(origin, entry.coord());
                (distance <= self.radius_km)
                    .then(|| (entry.position, entry.risk * inverse_distance_weight(distance)))
            })
            .collect();
        if nearby.is_empty() {
            return 0.0;
        }
        nearby.sort_unstable_by_key(|&(position, _)| position);
        let total: f64 = nearby.iter().map(|&(_, contribution)| contribution).sum();
        total / nearby.len() as f64
    }

    /// Search radius in kilometres.
    #[must_use]
    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Number of indexed incidents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no incidents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    fn candidates(&self, point: &RoutePoint) -> Vec<&IndexedIncident> {
        search_envelope(point, self.radius_km).map_or_else(
            || self.tree.iter().collect(),
            |envelope| self.tree.locate_in_envelope_intersecting(&envelope).collect(),
        )
    }
}

/// Weight in `(0, 1]` that falls off with distance.
#[expect(
    clippy::float_arithmetic,
    reason = "inverse-distance weighting is floating-point by definition"
)]
pub(crate) fn inverse_distance_weight(distance_km: f64) -> f64 {
    1.0 / (1.0 + distance_km * 2.0)
}

/// Longitude/latitude box enclosing the search circle, or `None` when the
/// circle reaches a pole or crosses the antimeridian.
#[expect(
    clippy::float_arithmetic,
    reason = "bounding a spherical cap needs trigonometry on the angular radius"
)]
fn search_envelope(point: &RoutePoint, radius_km: f64) -> Option<AABB<[f64; 2]>> {
    let angular = radius_km.max(0.0) / EARTH_RADIUS_KM;
    if !angular.is_finite() || angular >= FRAC_PI_2 {
        return None;
    }
    let lat_delta = angular.to_degrees() * ENVELOPE_MARGIN;
    let (min_lat, max_lat) = (point.lat() - lat_delta, point.lat() + lat_delta);
    if min_lat <= -90.0 || max_lat >= 90.0 {
        return None;
    }
    let spread = angular.sin() / point.lat().to_radians().cos();
    if !(0.0..1.0).contains(&spread) {
        return None;
    }
    let lng_delta = spread.asin().to_degrees() * ENVELOPE_MARGIN;
    let (min_lng, max_lng) = (point.lng() - lng_delta, point.lng() + lng_delta);
    if min_lng < -180.0 || max_lng > 180.0 {
        return None;
    }
    Some(AABB::from_corners([min_lng, min_lat], [max_lng, max_lat]))
}
