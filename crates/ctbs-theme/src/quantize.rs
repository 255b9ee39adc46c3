//! Color quantization — reduce an image's pixels to a few ranked swatches.
//!
//! The extractor only depends on the [`Quantizer`] trait. [`KMeans`] is the
//! implementation ctbs ships: k-means clustering in CIE Lab from
//! `kmeans_colors`, with every cluster ranked by how many pixels it holds.

use std::collections::BTreeMap;

use ctbs_color::Color;
use kmeans_colors::{Kmeans, get_kmeans};
use palette::{IntoColor, Lab, Srgb};

use crate::extract::Swatch;

/// Turns raw pixels into at most `max_colors` swatches, most populous first.
pub trait Quantizer {
    fn quantize(&self, pixels: &[[u8; 3]], max_colors: usize) -> Vec<Swatch>;
}

/// k-means over Lab pixels.
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    /// Iteration cap for one run.
    pub max_iterations: usize,
    /// A run stops once centroids move less than this.
    pub convergence: f32,
    /// Independent runs (seeds `0..runs`); the tightest clustering wins.
    pub runs: u64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            convergence: 1e-4,
            runs: 3,
        }
    }
}

impl KMeans {
    fn best_run(&self, lab: &[Lab], k: usize) -> Option<Kmeans<Lab>> {
        (0..self.runs.max(1))
            .map(|seed| get_kmeans(k, self.max_iterations, self.convergence, false, lab, seed))
            .min_by(|a, b| a.score.total_cmp(&b.score))
    }
}

impl Quantizer for KMeans {
    fn quantize(&self, pixels: &[[u8; 3]], max_colors: usize) -> Vec<Swatch> {
        if pixels.is_empty() || max_colors == 0 {
            return Vec::new();
        }

        // Fewer distinct colors than clusters: nothing to cluster.
        let distinct = count_distinct(pixels);
        if distinct.len() <= max_colors {
            return ranked(
                distinct
                    .into_iter()
                    .map(|([r, g, b], population)| Swatch { color: Color::rgb(r, g, b), population })
                    .collect(),
            );
        }

        let lab: Vec<Lab> = pixels.iter().map(|&px| to_lab(px)).collect();
        let Some(run) = self.best_run(&lab, max_colors) else {
            return Vec::new();
        };

        let mut populations = vec![0u32; run.centroids.len()];
        for &index in &run.indices {
            if let Some(n) = populations.get_mut(usize::from(index)) {
                *n = n.saturating_add(1);
            }
        }

        let mut swatches: Vec<Swatch> = Vec::with_capacity(run.centroids.len());
        for (&centroid, population) in run.centroids.iter().zip(populations) {
            if population == 0 {
                continue;
            }
            let color = from_lab(centroid);
            // Two centroids can round to the same 8-bit color; merge them.
            if let Some(existing) = swatches.iter_mut().find(|s| s.color == color) {
                existing.population = existing.population.saturating_add(population);
            } else {
                swatches.push(Swatch { color, population });
            }
        }
        ranked(swatches)
    }
}

fn count_distinct(pixels: &[[u8; 3]]) -> BTreeMap<[u8; 3], u32> {
    let mut counts = BTreeMap::new();
    for &px in pixels {
        let n: &mut u32 = counts.entry(px).or_default();
        *n = n.saturating_add(1);
    }
    counts
}

/// Most populous first; equal populations keep their order.
fn ranked(mut swatches: Vec<Swatch>) -> Vec<Swatch> {
    swatches.sort_by(|a, b| b.population.cmp(&a.population));
    swatches
}

fn to_lab([r, g, b]: [u8; 3]) -> Lab {
    Srgb::<u8>::new(r, g, b).into_linear().into_color()
}

fn from_lab(lab: Lab) -> Color {
    let rgb: Srgb<f32> = Srgb::from_linear(lab.into_color());
    let rgb = rgb.into_format::<u8>();
    Color::rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
