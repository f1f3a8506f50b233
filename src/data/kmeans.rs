//! Lloyd's k-means over 2-D points.
//!
//! Centroids are seeded with k-means++ and refined by alternating
//! assignment and mean updates until the centroid shift falls under the
//! tolerance or the iteration cap is hit. Initialization is random; pass a
//! seed in [`KMeansConfig`] for reproducible labels.
//!
//! When there are at least `k` points, every label in `0..k` is used: a
//! cluster that ends up empty takes the point farthest from its centroid
//! out of a cluster that can spare one.

use crate::constants::{DEFAULT_CLUSTER_COUNT, KMEANS_MAX_ITERATIONS, KMEANS_TOLERANCE};
use crate::data::error::{DataError, DataResult};
use crate::types::{ClusterPoint, ClusterView, Dataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A point in the feature space
pub type Point2 = [f64; 2];

/// Clustering parameters
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,
    /// Lloyd iteration cap
    pub max_iterations: usize,
    /// Convergence threshold, relative to the mean per-axis variance
    pub tolerance: f64,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_CLUSTER_COUNT,
            max_iterations: KMEANS_MAX_ITERATIONS,
            tolerance: KMEANS_TOLERANCE,
            seed: None,
        }
    }
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a k-means run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KMeansFit {
    /// Label per input point, same order as the input
    pub labels: Vec<usize>,
    /// Final centroids; fewer than `k` only when there were fewer than `k` points
    pub centroids: Vec<Point2>,
    /// Sum of squared distances from each point to its centroid
    pub inertia: f64,
    /// Lloyd iterations performed
    pub iterations: usize,
}

/// Cluster the dataset rows over (hour, weekday).
pub fn cluster(dataset: &Dataset, config: &KMeansConfig) -> DataResult<ClusterView> {
    let features: Vec<Point2> = dataset
        .rows()
        .iter()
        .map(|row| [row.hour as f64, row.weekday as f64])
        .collect();

    let fit = kmeans(&features, config)?;

    let points = dataset
        .rows()
        .iter()
        .zip(&fit.labels)
        .map(|(row, &cluster)| ClusterPoint {
            hour: row.hour,
            weekday: row.weekday,
            cluster,
        })
        .collect();

    tracing::debug!(
        k = config.k,
        iterations = fit.iterations,
        inertia = fit.inertia,
        "Clustered {} rows",
        dataset.len()
    );

    Ok(ClusterView {
        points,
        centroids: fit.centroids.iter().map(|c| (c[0], c[1])).collect(),
        inertia: fit.inertia,
        iterations: fit.iterations,
    })
}

/// Run k-means on raw points.
pub fn kmeans(points: &[Point2], config: &KMeansConfig) -> DataResult<KMeansFit> {
    if config.k == 0 {
        return Err(DataError::InvalidClusterCount(config.k));
    }
    if points.is_empty() {
        return Ok(KMeansFit::default());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let k = config.k.min(points.len());
    let tolerance = config.tolerance * mean_variance(points);

    let mut centroids = kmeans_plus_plus(points, k, &mut rng);
    let mut labels = vec![0usize; points.len()];
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        assign(points, &centroids, &mut labels);
        let updated = update_centroids(points, &labels, &centroids);
        let shift: f64 = centroids
            .iter()
            .zip(&updated)
            .map(|(a, b)| squared_distance(a, b))
            .sum();
        centroids = updated;
        if shift <= tolerance {
            break;
        }
    }

    assign(points, &centroids, &mut labels);
    if fill_empty_clusters(points, &mut labels, &mut centroids) {
        centroids = update_centroids(points, &labels, &centroids);
    }

    let inertia: f64 = points
        .iter()
        .zip(&labels)
        .map(|(p, &l)| squared_distance(p, &centroids[l]))
        .sum();

    Ok(KMeansFit {
        labels,
        centroids,
        inertia,
        iterations,
    })
}

fn squared_distance(a: &Point2, b: &Point2) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Mean of the per-axis variances
fn mean_variance(points: &[Point2]) -> f64 {
    let n = points.len() as f64;
    let mut total = 0.0;
    for axis in 0..2 {
        let mean = points.iter().map(|p| p[axis]).sum::<f64>() / n;
        total += points.iter().map(|p| (p[axis] - mean).powi(2)).sum::<f64>() / n;
    }
    total / 2.0
}

/// k-means++ seeding: each next centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn kmeans_plus_plus(points: &[Point2], k: usize, rng: &mut StdRng) -> Vec<Point2> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())]);

    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();
        let idx = if total <= 0.0 {
            rng.gen_range(0..points.len())
        } else {
            let target = rng.gen_range(0.0..total);
            let mut cumulative = 0.0;
            let mut chosen = None;
            for (i, d) in nearest.iter().enumerate() {
                cumulative += d;
                if *d > 0.0 && cumulative >= target {
                    chosen = Some(i);
                    break;
                }
            }
            // Float rounding can leave target just above the final sum
            chosen
                .or_else(|| nearest.iter().rposition(|d| *d > 0.0))
                .unwrap_or(0)
        };

        let next = points[idx];
        for (d, p) in nearest.iter_mut().zip(points) {
            *d = d.min(squared_distance(p, &next));
        }
        centroids.push(next);
    }

    centroids
}

/// Assign each point to its nearest centroid; ties go to the lowest index.
fn assign(points: &[Point2], centroids: &[Point2], labels: &mut [usize]) {
    for (label, p) in labels.iter_mut().zip(points) {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, c) in centroids.iter().enumerate() {
            let d = squared_distance(p, c);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        *label = best;
    }
}

/// Member means; an empty cluster keeps its previous centroid.
fn update_centroids(points: &[Point2], labels: &[usize], previous: &[Point2]) -> Vec<Point2> {
    let mut sums = vec![[0.0f64; 2]; previous.len()];
    let mut counts = vec![0usize; previous.len()];
    for (p, &l) in points.iter().zip(labels) {
        sums[l][0] += p[0];
        sums[l][1] += p[1];
        counts[l] += 1;
    }
    sums.iter()
        .zip(&counts)
        .zip(previous)
        .map(|((sum, &count), prev)| {
            if count == 0 {
                *prev
            } else {
                [sum[0] / count as f64, sum[1] / count as f64]
            }
        })
        .collect()
}

/// Give every empty cluster one point. Returns whether anything moved.
fn fill_empty_clusters(points: &[Point2], labels: &mut [usize], centroids: &mut [Point2]) -> bool {
    let mut sizes = vec![0usize; centroids.len()];
    for &l in labels.iter() {
        sizes[l] += 1;
    }

    let mut moved = false;
    for empty in 0..centroids.len() {
        if sizes[empty] != 0 {
            continue;
        }

        let donor = points
            .iter()
            .zip(labels.iter())
            .enumerate()
            .filter(|(_, (_, l))| sizes[**l] > 1)
            .map(|(i, (p, &l))| (i, squared_distance(p, &centroids[l])))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d >= d => best,
                _ => Some((i, d)),
            });

        let Some((i, _)) = donor else {
            break;
        };

        sizes[labels[i]] -= 1;
        labels[i] = empty;
        sizes[empty] = 1;
        centroids[empty] = points[i];
        moved = true;
    }
    moved
}
