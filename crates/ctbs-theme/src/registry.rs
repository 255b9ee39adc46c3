//! The variable registry — every `--CTBS-…` name the stylesheet declares.
//!
//! The registry is read from the rewritten CSS (the variables file plus an
//! optional overrides file). The theme emits exactly these names, no more
//! and no fewer.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Result, ThemeError};
use crate::roles::Role;
use crate::variable::{PREFIX, Variable};

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--CTBS-[A-Za-z0-9-]*").expect("registry pattern is valid"));

/// Names containing this are opacity/blur knobs, not colors.
const NON_COLOR_MARKER: &str = "Glass";

/// Sorted, deduplicated set of declared variable names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    names: BTreeSet<String>,
}

impl Registry {
    /// Collect names from CSS text.
    #[must_use]
    pub fn scan(css: &str) -> Self {
        let mut registry = Self::default();
        registry.extend_from(css);
        registry
    }

    /// Add every name found in `css`.
    pub fn extend_from(&mut self, css: &str) {
        for m in NAME.find_iter(css) {
            let name = m.as_str();
            if name.len() > PREFIX.len() && !name.contains(NON_COLOR_MARKER) {
                self.names.insert(name.to_owned());
            }
        }
    }

    /// Collect names from the files that exist among `paths`.
    ///
    /// A missing file contributes nothing; any other I/O failure is an
    /// error. An empty result falls back to [`Registry::base_roles`].
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut registry = Self::default();
        for path in paths {
            let path = path.as_ref();
            let css = match std::fs::read_to_string(path) {
                Ok(css) => css,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "registry source not found, skipping");
                    continue;
                }
                Err(source) => {
                    return Err(ThemeError::Io {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            };
            let before = registry.len();
            registry.extend_from(&css);
            debug!(path = %path.display(), added = registry.len() - before, "scanned registry source");
        }

        if registry.is_empty() {
            warn!("no --CTBS- variables declared, falling back to the base role colors");
            return Ok(Self::base_roles());
        }
        Ok(registry)
    }

    /// The eight light-mode base role variables.
    #[must_use]
    pub fn base_roles() -> Self {
        let names = Role::ALL
            .into_iter()
            .map(|role| format!("{PREFIX}{role}"))
            .collect();
        Self { names }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parse every name. The first unrecognized one is an error.
    pub fn variables(&self) -> Result<Vec<Variable>> {
        self.names().map(Variable::parse).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Registry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
