//! Palette extraction — from an image file to a ranked list of swatches.
//!
//! ```text
//! image file ─→ decode (image crate) ─→ optional Gaussian blur
//!            ─→ sample every 10th opaque, non-white pixel
//!            ─→ Quantizer ─→ Palette (most populous first)
//! ```
//!
//! The blur pass suppresses single-pixel noise (JPEG artifacts, film
//! grain, dithering) that would otherwise win clusters of its own.

use std::path::Path;

use ctbs_color::Color;
use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::error::{Result, ThemeError};
use crate::quantize::{KMeans, Quantizer};

/// Smallest accepted cluster count.
pub const MIN_CLUSTERS: u32 = 1;
/// Largest accepted cluster count.
pub const MAX_CLUSTERS: u32 = 32;
/// Cluster count used when none is given.
pub const DEFAULT_CLUSTERS: u32 = 12;

/// Sigma of the smoothing pre-pass, in pixels.
const BLUR_SIGMA: f32 = 8.0;
/// Only every n-th pixel is fed to the quantizer.
const SAMPLE_STRIDE: usize = 10;
/// Pixels more transparent than this are ignored.
const MIN_ALPHA: u8 = 125;
/// Pixels with every channel above this are treated as paper/background.
const WHITE_CUTOFF: u8 = 250;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// One extracted color and how many sampled pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Color,
    pub population: u32,
}

/// Ranked colors of one image, most significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    /// Wrap already-ranked swatches.
    #[must_use]
    pub const fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }

    /// Build a palette from colors given in rank order.
    ///
    /// Populations are synthesized (descending) so the order is preserved.
    #[must_use]
    pub fn from_colors(colors: &[Color]) -> Self {
        let n = u32::try_from(colors.len()).unwrap_or(u32::MAX);
        let swatches = colors
            .iter()
            .zip((1..=n).rev())
            .map(|(&color, population)| Swatch { color, population })
            .collect();
        Self { swatches }
    }

    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Colors in rank order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.swatches.iter().map(|s| s.color)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How to extract one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Maximum number of swatches, `MIN_CLUSTERS..=MAX_CLUSTERS`.
    pub clusters: u32,
    /// Run the Gaussian smoothing pre-pass.
    pub blur: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            blur: true,
        }
    }
}

impl ExtractOptions {
    /// Reject out-of-range cluster counts.
    pub const fn validate(&self) -> Result<()> {
        check_clusters(self.clusters)
    }
}

/// Reject a cluster count outside `MIN_CLUSTERS..=MAX_CLUSTERS`.
pub const fn check_clusters(value: u32) -> Result<()> {
    if value < MIN_CLUSTERS || value > MAX_CLUSTERS {
        return Err(ThemeError::ClusterCount {
            value,
            min: MIN_CLUSTERS,
            max: MAX_CLUSTERS,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract a palette from an image file with the default quantizer.
///
/// Options are validated before the file is touched.
pub fn extract_palette(path: &Path, options: &ExtractOptions) -> Result<Palette> {
    extract_palette_with(path, options, &KMeans::default())
}

/// Extract a palette from an image file with a caller-chosen quantizer.
pub fn extract_palette_with(
    path: &Path,
    options: &ExtractOptions,
    quantizer: &dyn Quantizer,
) -> Result<Palette> {
    options.validate()?;

    if !path.exists() {
        return Err(ThemeError::MissingImage {
            path: path.to_path_buf(),
        });
    }
    let image = image::open(path).map_err(|source| ThemeError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let palette = palette_from_image(&image, options, quantizer);
    debug!(
        path = %path.display(),
        clusters = options.clusters,
        blur = options.blur,
        swatches = palette.len(),
        "extracted palette"
    );
    Ok(palette)
}

/// Extract a palette from an already decoded image.
#[must_use]
pub fn palette_from_image(
    image: &DynamicImage,
    options: &ExtractOptions,
    quantizer: &dyn Quantizer,
) -> Palette {
    let rgba = image.to_rgba8();
    let rgba = if options.blur {
        image::imageops::blur(&rgba, BLUR_SIGMA)
    } else {
        rgba
    };

    let pixels = sample_pixels(&rgba);
    let max_colors = usize::try_from(options.clusters).unwrap_or(usize::MAX);
    Palette::new(quantizer.quantize(&pixels, max_colors))
}

fn sample_pixels(rgba: &RgbaImage) -> Vec<[u8; 3]> {
    rgba.pixels()
        .step_by(SAMPLE_STRIDE)
        .filter(|px| {
            let [r, g, b, a] = px.0;
            a >= MIN_ALPHA && !(r > WHITE_CUTOFF && g > WHITE_CUTOFF && b > WHITE_CUTOFF)
        })
        .map(|px| [px.0[0], px.0[1], px.0[2]])
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
