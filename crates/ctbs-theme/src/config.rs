//! Generator configuration — everything one theme run needs, validated
//! before any file is read.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extract::ExtractOptions;
use crate::roles::MapperConfig;

/// Default location of the rewritten Bootstrap variables.
pub const DEFAULT_VARS_FILE: &str = "css/ctbs-variables.css";
/// Default location of the optional overrides stylesheet.
pub const DEFAULT_OVERRIDES_FILE: &str = "css/ctbs-overrides.css";

/// Inputs and knobs for [`generate`](crate::theme::generate).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Source image for the light theme (and the dark one, if no dark
    /// image is given).
    pub image: PathBuf,
    /// Separate source image for the dark theme.
    pub dark_image: Option<PathBuf>,
    /// Extraction of the light palette.
    pub light: ExtractOptions,
    /// Extraction of the dark palette; only used with `dark_image`.
    pub dark: ExtractOptions,
    /// CSS files the variable registry is collected from, in order.
    pub registry_sources: Vec<PathBuf>,
    pub mapper: MapperConfig,
}

impl GeneratorConfig {
    /// Defaults for everything but the image.
    #[must_use]
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            dark_image: None,
            light: ExtractOptions::default(),
            dark: ExtractOptions::default(),
            registry_sources: vec![
                PathBuf::from(DEFAULT_VARS_FILE),
                PathBuf::from(DEFAULT_OVERRIDES_FILE),
            ],
            mapper: MapperConfig::default(),
        }
    }

    #[must_use]
    pub fn with_dark_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.dark_image = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_registry_sources<P: AsRef<Path>>(mut self, sources: &[P]) -> Self {
        self.registry_sources = sources.iter().map(|p| p.as_ref().to_path_buf()).collect();
        self
    }

    /// Check the numeric knobs.
    pub fn validate(&self) -> Result<()> {
        self.light.validate()?;
        if self.dark_image.is_some() {
            self.dark.validate()?;
        }
        Ok(())
    }
}
