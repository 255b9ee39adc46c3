use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThemeError>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image not found: {path}")]
    MissingImage { path: PathBuf },

    #[error("cannot decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cluster count {value} out of range ({min}..={max})")]
    ClusterCount { value: u32, min: u32, max: u32 },

    #[error("unrecognized theme variable `{name}` (registry and pairing rules are out of sync)")]
    UnknownVariable { name: String },

    #[error("`{name}` is not a text variable and has no background pairing")]
    NotText { name: String },

    #[error("`{name}` renders on `{background}`, which has no value")]
    Unpaired { name: String, background: String },

    #[error("invalid color value for `{name}`: {value}")]
    InvalidValue { name: String, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ThemeError {
    /// Whether this error was caused by invalid configuration, as opposed
    /// to bad input data or I/O.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::ClusterCount { .. })
    }

    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::ThemeError;

    #[test]
    fn unknown_variable_names_the_variable() {
        let error = ThemeError::unknown("--CTBS-PrimaryFrobColor");
        assert!(error.to_string().contains("--CTBS-PrimaryFrobColor"));
        assert!(!error.is_config());
    }

    #[test]
    fn cluster_count_is_config_error() {
        let error = ThemeError::ClusterCount { value: 40, min: 1, max: 32 };
        assert!(error.is_config());
        assert_eq!(error.to_string(), "cluster count 40 out of range (1..=32)");
    }
}
