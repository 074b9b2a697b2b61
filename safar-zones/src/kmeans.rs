//! Seeded k-means++ clustering over standardised feature vectors.
//!
//! Every random draw comes from a single `ChaCha8Rng` stream seeded from the
//! configuration, so a given dataset and seed always produce the same
//! centroids. Restarts draw from the same stream one after another and the run
//! with the lowest inertia wins; on equal inertia the earliest restart is kept.

use rand::Rng;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand_chacha::ChaCha8Rng;

use crate::scaler::Standardised;
use crate::{ModelFitError, ZoneModelConfig};

/// Result of one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Clustering {
    pub(crate) centroids: Vec<Standardised>,
    pub(crate) labels: Vec<usize>,
    pub(crate) inertia: f64,
}

/// Cluster `points` into `config.zones` groups.
pub(crate) fn cluster(
    points: &[Standardised],
    config: &ZoneModelConfig,
) -> Result<Clustering, ModelFitError> {
    validate(points.len(), config)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut best: Option<Clustering> = None;
    for restart in 0..config.restarts {
        let seeds = seed_centroids(points, config.zones, &mut rng);
        let run = lloyd(points, seeds, config.max_iterations);
        log::debug!("k-means restart {restart} finished with inertia {:.6}", run.inertia);
        if best.as_ref().is_none_or(|current| run.inertia < current.inertia) {
            best = Some(run);
        }
    }
    best.ok_or(ModelFitError::NoRestarts)
}

const fn validate(incidents: usize, config: &ZoneModelConfig) -> Result<(), ModelFitError> {
    if incidents == 0 {
        return Err(ModelFitError::Empty);
    }
    if config.zones == 0 {
        return Err(ModelFitError::NoZones);
    }
    if config.restarts == 0 {
        return Err(ModelFitError::NoRestarts);
    }
    if incidents < config.zones {
        return Err(ModelFitError::TooFewIncidents {
            incidents,
            zones: config.zones,
        });
    }
    Ok(())
}

/// k-means++ initialisation: each further centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen centroid.
///
/// When every remaining weight is zero (all points coincide with chosen
/// centroids) the draw falls back to a uniform pick.
fn seed_centroids(points: &[Standardised], zones: usize, rng: &mut ChaCha8Rng) -> Vec<Standardised> {
    let mut centroids = Vec::with_capacity(zones);
    let Some(&first) = points.get(rng.gen_range(0..points.len())) else {
        return centroids;
    };
    centroids.push(first);

    let mut closest: Vec<f64> = points.iter().map(|p| squared_distance(p, &first)).collect();
    while centroids.len() < zones {
        let pick = match WeightedIndex::<f64>::new(&closest) {
            Ok(weights) => weights.sample(rng),
            Err(_) => rng.gen_range(0..points.len()),
        };
        let Some(&next) = points.get(pick) else {
            break;
        };
        centroids.push(next);
        for (best, point) in closest.iter_mut().zip(points) {
            *best = best.min(squared_distance(point, &next));
        }
    }
    centroids
}

/// Alternate assignment and centroid updates until labels stop changing or
/// the iteration cap is reached.
fn lloyd(points: &[Standardised], seeds: Vec<Standardised>, max_iterations: usize) -> Clustering {
    let mut centroids = seeds;
    let mut labels = assign_all(points, &centroids);
    for _ in 0..max_iterations {
        centroids = update_centroids(points, &labels, &centroids);
        let next = assign_all(points, &centroids);
        if next == labels {
            break;
        }
        labels = next;
    }
    let inertia = points
        .iter()
        .zip(&labels)
        .filter_map(|(point, &label)| centroids.get(label).map(|c| squared_distance(point, c)))
        .sum();
    Clustering {
        centroids,
        labels,
        inertia,
    }
}

fn assign_all(points: &[Standardised], centroids: &[Standardised]) -> Vec<usize> {
    points.iter().map(|point| nearest(point, centroids)).collect()
}

/// Index of the closest centroid. Ties resolve to the lowest index.
pub(crate) fn nearest(point: &Standardised, centroids: &[Standardised]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// Mean of each cluster's members. An empty cluster keeps its previous
/// centroid.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "centroids are arithmetic means of member vectors"
)]
fn update_centroids(
    points: &[Standardised],
    labels: &[usize],
    previous: &[Standardised],
) -> Vec<Standardised> {
    let mut sums = vec![[0.0; safar_core::FEATURE_COUNT]; previous.len()];
    let mut counts = vec![0_usize; previous.len()];
    for (point, &label) in points.iter().zip(labels) {
        if let (Some(sum), Some(count)) = (sums.get_mut(label), counts.get_mut(label)) {
            for (acc, value) in sum.iter_mut().zip(point) {
                *acc += value;
            }
            *count += 1;
        }
    }
    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((mut sum, count), old)| {
            if count == 0 {
                return *old;
            }
            let members = count as f64;
            for value in &mut sum {
                *value /= members;
            }
            sum
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "squared Euclidean distance in standardised space"
)]
pub(crate) fn squared_distance(a: &Standardised, b: &Standardised) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
