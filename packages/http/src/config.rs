//! Instrumentation configuration and naming-strategy wiring.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use traceline_core::{
    DynamicNaming, FixedNaming, NamingMode, OverrideSources, SegmentNaming,
};

/// Configuration for request naming.
///
/// No `Default` impl because the service name has no sensible default; use
/// [`InstrumentConfig::new`] or deserialize from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentConfig {
    /// Fallback segment name when the host header is absent or unrecognized.
    pub service_name: String,
    /// Wildcard pattern host values must match to be trusted as segment
    /// names. `None` trusts any host value.
    #[serde(default)]
    pub recognized_hosts: Option<String>,
    /// Configuration-property source for the segment name override. The
    /// `TRACELINE_TRACING_NAME` environment variable outranks it.
    #[serde(default)]
    pub tracing_name: Option<String>,
    /// Which strategy variant to construct.
    #[serde(default)]
    pub naming: NamingMode,
}

impl InstrumentConfig {
    /// Creates a configuration with the given service name and everything
    /// else defaulted: dynamic naming, any host trusted, no override.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            recognized_hosts: None,
            tracing_name: None,
            naming: NamingMode::default(),
        }
    }

    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when the document is not valid JSON or
    /// is missing the service name.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` when the file cannot be read and
    /// `ConfigError::Parse` when its contents do not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}

/// Errors from loading an [`InstrumentConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Constructs the configured naming strategy.
///
/// This is the once-per-process wiring step: for the dynamic variant the
/// override sources are captured here, from the process environment plus the
/// config property, and resolved during construction. The returned strategy
/// never changes its effective fallback afterwards.
#[must_use]
pub fn build_naming(config: &InstrumentConfig) -> Arc<dyn SegmentNaming> {
    match config.naming {
        NamingMode::Fixed => Arc::new(FixedNaming::new(config.service_name.clone())),
        NamingMode::Dynamic => {
            let sources = OverrideSources::from_process_env()
                .with_property(config.tracing_name.clone());
            Arc::new(DynamicNaming::with_sources(
                config.service_name.clone(),
                config.recognized_hosts.clone(),
                &sources,
            ))
        }
    }
}
