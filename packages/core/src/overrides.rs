//! Process-wide segment name override.
//!
//! Operators can rename every segment a process emits without touching the
//! wiring code, either through the [`NAME_OVERRIDE_ENV_VAR`] environment
//! variable or through the [`NAME_OVERRIDE_PROPERTY_KEY`] configuration
//! property. Both sources are captured into an [`OverrideSources`] value by
//! the bootstrap code and resolved exactly once, when a naming strategy is
//! constructed. Changing the environment afterwards has no effect on a
//! running process.

/// Environment variable consulted for the segment name override.
pub const NAME_OVERRIDE_ENV_VAR: &str = "TRACELINE_TRACING_NAME";

/// Configuration property key consulted for the segment name override.
pub const NAME_OVERRIDE_PROPERTY_KEY: &str = "tracing.name";

/// Captured override sources, resolved with first-non-empty-wins precedence.
///
/// The environment variable outranks the configuration property. Holding the
/// raw values as plain data keeps the precedence rule testable without
/// touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct OverrideSources {
    env_value: Option<String>,
    property_value: Option<String>,
}

impl OverrideSources {
    /// Creates sources from already-read values.
    #[must_use]
    pub fn new(env_value: Option<String>, property_value: Option<String>) -> Self {
        Self {
            env_value,
            property_value,
        }
    }

    /// Reads [`NAME_OVERRIDE_ENV_VAR`] from the process environment.
    ///
    /// The property source starts absent; wiring code that has loaded a
    /// configuration file supplies it via [`OverrideSources::with_property`].
    #[must_use]
    pub fn from_process_env() -> Self {
        Self::new(std::env::var(NAME_OVERRIDE_ENV_VAR).ok(), None)
    }

    /// Returns these sources with the configuration property value set.
    #[must_use]
    pub fn with_property(mut self, value: Option<String>) -> Self {
        self.property_value = value;
        self
    }

    /// Resolves the override: the first non-blank source wins.
    ///
    /// Checked in order: environment variable, then configuration property.
    /// Empty and whitespace-only values count as unset. Returns the winning
    /// value with surrounding whitespace removed, or `None` when neither
    /// source is set.
    #[must_use]
    pub fn resolve(&self) -> Option<String> {
        non_blank(self.env_value.as_deref()).or_else(|| non_blank(self.property_value.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_with_no_sources_is_none() {
        assert_eq!(OverrideSources::new(None, None).resolve(), None);
    }

    #[test]
    fn env_value_wins_over_property() {
        let sources = OverrideSources::new(
            Some("envname".to_string()),
            Some("propname".to_string()),
        );
        assert_eq!(sources.resolve(), Some("envname".to_string()));
    }

    #[test]
    fn property_used_when_env_unset() {
        let sources = OverrideSources::new(None, Some("propname".to_string()));
        assert_eq!(sources.resolve(), Some("propname".to_string()));
    }

    #[test]
    fn property_used_when_env_blank() {
        let sources = OverrideSources::new(
            Some("   ".to_string()),
            Some("propname".to_string()),
        );
        assert_eq!(sources.resolve(), Some("propname".to_string()));
    }

    #[test]
    fn blank_sources_resolve_to_none() {
        let sources = OverrideSources::new(Some(String::new()), Some(" \t".to_string()));
        assert_eq!(sources.resolve(), None);
    }

    #[test]
    fn resolved_value_is_trimmed() {
        let sources = OverrideSources::new(Some("  checkout  ".to_string()), None);
        assert_eq!(sources.resolve(), Some("checkout".to_string()));
    }

    #[test]
    fn with_property_fills_only_the_property_slot() {
        let sources = OverrideSources::new(None, None).with_property(Some("propname".to_string()));
        assert_eq!(sources.resolve(), Some("propname".to_string()));
    }
}
