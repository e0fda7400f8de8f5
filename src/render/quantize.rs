//! Palette quantization by fixed-iteration k-means.
//!
//! Centroids are seeded with the first `k` input colours, then refined for a
//! fixed number of rounds with no convergence check. Assignment uses plain
//! Euclidean RGB distance; ties go to the lowest centroid index. Each input
//! colour may carry a pixel count, so a centroid settles on the mean of the
//! pixels it covers rather than of the distinct colours.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::{Colour, Palette};

/// Default number of k-means rounds.
pub const DEFAULT_ITERATIONS: usize = 10;

/// What to do with a centroid whose cluster came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Reseed {
    /// Replace it with a uniformly random colour.
    #[default]
    Random,
    /// Replace it with the input colour farthest from its own centroid.
    Farthest,
}

impl fmt::Display for Reseed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reseed::Random => write!(f, "random"),
            Reseed::Farthest => write!(f, "farthest"),
        }
    }
}

/// Quantizer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizeOptions {
    /// Number of k-means rounds.
    pub iterations: usize,
    /// Empty-cluster strategy.
    pub reseed: Reseed,
    /// Seed for [`Reseed::Random`]; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            reseed: Reseed::Random,
            seed: None,
        }
    }
}

/// K-means palette builder.
pub struct Quantizer {
    iterations: usize,
    reseed: Reseed,
    rng: StdRng,
}

impl Quantizer {
    pub fn new(options: &QuantizeOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            iterations: options.iterations,
            reseed: options.reseed,
            rng,
        }
    }

    /// Reduce `colours` to at most `k` representatives.
    ///
    /// When there are no more than `k` colours they are returned unchanged;
    /// `k == 0` yields an empty palette.
    pub fn quantize(&mut self, colours: &[Colour], k: usize) -> Palette {
        let weighted: Vec<(Colour, u64)> = colours.iter().map(|&c| (c, 1)).collect();
        self.quantize_weighted(&weighted, k)
    }

    /// Like [`Quantizer::quantize`], with each colour counted `weight` times
    /// when centroids are averaged. Zero-weight entries still take part in
    /// seeding and reseeding.
    pub fn quantize_weighted(&mut self, population: &[(Colour, u64)], k: usize) -> Palette {
        if k == 0 {
            return Palette::default();
        }
        let colours: Vec<Colour> = population.iter().map(|&(c, _)| c).collect();
        if colours.len() <= k {
            return Palette::new(colours);
        }

        let weights: Vec<u64> = population.iter().map(|&(_, w)| w).collect();
        let mut centroids: Vec<Colour> = colours[..k].to_vec();
        let mut assignment = vec![0usize; colours.len()];

        for _ in 0..self.iterations {
            assign(&colours, &centroids, &mut assignment);
            centroids = self.update(&colours, &weights, &centroids, &assignment);
        }

        Palette::new(centroids)
    }

    /// Recompute every centroid as the rounded weighted mean of its cluster.
    fn update(
        &mut self,
        colours: &[Colour],
        weights: &[u64],
        centroids: &[Colour],
        assignment: &[usize],
    ) -> Vec<Colour> {
        let k = centroids.len();
        let mut sums = vec![[0u64; 3]; k];
        let mut counts = vec![0u64; k];

        for ((colour, &weight), &cluster) in colours.iter().zip(weights).zip(assignment) {
            sums[cluster][0] += colour.r as u64 * weight;
            sums[cluster][1] += colour.g as u64 * weight;
            sums[cluster][2] += colour.b as u64 * weight;
            counts[cluster] += weight;
        }

        let mut next: Vec<Option<Colour>> = sums
            .iter()
            .zip(&counts)
            .map(|(sum, &n)| {
                // Round half up.
                let mean = |s: u64| ((s + n / 2) / n) as u8;
                (n > 0).then(|| Colour::rgb(mean(sum[0]), mean(sum[1]), mean(sum[2])))
            })
            .collect();

        for i in 0..k {
            if next[i].is_some() {
                continue;
            }
            let replacement = match self.reseed {
                Reseed::Random => Colour::rgb(self.rng.gen(), self.rng.gen(), self.rng.gen()),
                Reseed::Farthest => {
                    let taken: Vec<Colour> = next.iter().flatten().copied().collect();
                    farthest(colours, centroids, assignment, &taken)
                }
            };
            next[i] = Some(replacement);
        }

        next.into_iter().flatten().collect()
    }
}

/// Index of the nearest centroid for every colour.
fn assign(colours: &[Colour], centroids: &[Colour], assignment: &mut [usize]) {
    for (colour, slot) in colours.iter().zip(assignment.iter_mut()) {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, centroid) in centroids.iter().enumerate() {
            let dist = colour.distance_squared(*centroid);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        *slot = best;
    }
}

/// The colour farthest from its assigned centroid that is not already in use.
fn farthest(colours: &[Colour], centroids: &[Colour], assignment: &[usize], taken: &[Colour]) -> Colour {
    let mut best: Option<(Colour, u32)> = None;
    for (colour, &cluster) in colours.iter().zip(assignment) {
        if taken.contains(colour) {
            continue;
        }
        let dist = colour.distance_squared(centroids[cluster]);
        if best.map_or(true, |(_, d)| dist > d) {
            best = Some((*colour, dist));
        }
    }
    // Every input colour is taken: any of them will do.
    best.map_or(colours[0], |(c, _)| c)
}

/// Build a palette in one call.
pub fn quantize(colours: &[Colour], k: usize, options: &QuantizeOptions) -> Palette {
    Quantizer::new(options).quantize(colours, k)
}

/// Build a palette from `(colour, pixel count)` pairs in one call.
pub fn quantize_weighted(
    population: &[(Colour, u64)],
    k: usize,
    options: &QuantizeOptions,
) -> Palette {
    Quantizer::new(options).quantize_weighted(population, k)
}
