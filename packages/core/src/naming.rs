//! Segment naming strategies.
//!
//! Every trace segment carries a display name. The strategies here decide
//! that name for an incoming HTTP request: [`FixedNaming`] always answers
//! with one configured value, while [`DynamicNaming`] prefers the request's
//! `Host` header when it matches a recognized pattern and falls back to a
//! configured name otherwise.
//!
//! Both variants are immutable once constructed, so a shared
//! `Arc<dyn SegmentNaming>` can be consulted from any number of tasks
//! without locking.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::overrides::{OverrideSources, NAME_OVERRIDE_ENV_VAR, NAME_OVERRIDE_PROPERTY_KEY};
use crate::pattern::wildcard_match;

/// Header consulted by the dynamic strategy.
const HOST_HEADER: &str = "host";

/// Read-only view of a request's headers.
///
/// The naming strategies only ever read the `Host` header; accepting this
/// capability instead of a concrete request type keeps the core independent
/// of any particular HTTP stack. Header names are matched
/// case-insensitively, as HTTP requires.
pub trait HeaderLookup {
    /// Returns the value of the named header, or `None` when the header is
    /// absent or its value is not representable as a string.
    fn header_value(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HashMap<String, String> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(feature = "http")]
impl HeaderLookup for http::HeaderMap {
    fn header_value(&self, name: &str) -> Option<&str> {
        // Values carrying non-UTF-8 bytes read as absent; the caller falls
        // back the same way it would for a missing header.
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Decides the segment name for an incoming request.
///
/// Callers hold `Arc<dyn SegmentNaming>` and never depend on the concrete
/// variant. Implementations are immutable after construction and safe to
/// share across threads.
pub trait SegmentNaming: fmt::Debug + Send + Sync {
    /// Returns the segment name for the request described by `request`.
    fn name_for_request(&self, request: &dyn HeaderLookup) -> String;
}

/// Which naming strategy the wiring should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    /// Name segments after the request's `Host` header when recognized.
    #[default]
    Dynamic,
    /// Name every segment with the configured service name.
    Fixed,
}

/// Names every segment with a single configured value.
#[derive(Debug, Clone)]
pub struct FixedNaming {
    name: String,
}

impl FixedNaming {
    /// Creates a strategy that always answers with `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SegmentNaming for FixedNaming {
    fn name_for_request(&self, _request: &dyn HeaderLookup) -> String {
        self.name.clone()
    }
}

/// Names segments after the request's `Host` header when it is recognized.
///
/// A request's host value is used verbatim as the segment name when it is
/// present and matches the recognized-hosts pattern; otherwise the fallback
/// name answers. The fallback is fixed at construction time: the override
/// sources are resolved once, and a non-blank override permanently replaces
/// the configured fallback for the lifetime of the strategy.
#[derive(Debug, Clone)]
pub struct DynamicNaming {
    fallback_name: String,
    recognized_hosts: Option<String>,
}

impl DynamicNaming {
    /// Creates a strategy that trusts any host value.
    ///
    /// Reads the override from the process environment. `fallback_name` is
    /// used when the request has no `Host` header.
    #[must_use]
    pub fn new(fallback_name: impl Into<String>) -> Self {
        Self::with_sources(fallback_name, None, &OverrideSources::from_process_env())
    }

    /// Creates a strategy that only trusts host values matching
    /// `recognized_hosts` (see [`wildcard_match`] for the pattern language).
    ///
    /// Reads the override from the process environment.
    #[must_use]
    pub fn with_recognized_hosts(
        fallback_name: impl Into<String>,
        recognized_hosts: impl Into<String>,
    ) -> Self {
        Self::with_sources(
            fallback_name,
            Some(recognized_hosts.into()),
            &OverrideSources::from_process_env(),
        )
    }

    /// Creates a strategy from explicit override sources.
    ///
    /// This is the complete constructor: the convenience constructors
    /// delegate here, and wiring code that has its own configuration layer
    /// builds the sources itself. A `None` pattern trusts every host value.
    ///
    /// Resolution happens here, exactly once. When an override wins, an
    /// informational event records the replacement.
    #[must_use]
    pub fn with_sources(
        fallback_name: impl Into<String>,
        recognized_hosts: Option<String>,
        sources: &OverrideSources,
    ) -> Self {
        let mut fallback_name = fallback_name.into();
        if let Some(override_name) = sources.resolve() {
            tracing::info!(
                env_var = NAME_OVERRIDE_ENV_VAR,
                property = NAME_OVERRIDE_PROPERTY_KEY,
                configured = %fallback_name,
                effective = %override_name,
                "segment name override is set, replacing the configured fallback name"
            );
            fallback_name = override_name;
        }
        Self {
            fallback_name,
            recognized_hosts,
        }
    }

    /// The name answered when the host value is absent or unrecognized.
    #[must_use]
    pub fn fallback_name(&self) -> &str {
        &self.fallback_name
    }

    /// The recognized-hosts pattern, or `None` when any host is trusted.
    #[must_use]
    pub fn recognized_hosts(&self) -> Option<&str> {
        self.recognized_hosts.as_deref()
    }
}

impl SegmentNaming for DynamicNaming {
    fn name_for_request(&self, request: &dyn HeaderLookup) -> String {
        if let Some(host) = request.header_value(HOST_HEADER) {
            let recognized = self
                .recognized_hosts
                .as_deref()
                .is_none_or(|pattern| wildcard_match(pattern, host));
            if recognized {
                // Verbatim: only the pattern comparison is case-folded.
                return host.to_string();
            }
        }
        self.fallback_name.clone()
    }
}
