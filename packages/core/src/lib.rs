//! Traceline Core — segment naming strategies and wildcard host matching.
//!
//! The instrumentation layer labels every trace segment with a
//! human-readable name. This crate holds the decision engine: a
//! [`SegmentNaming`] capability with a fixed and a dynamic variant, the
//! process-wide name override, and the glob matcher that validates observed
//! host values.

pub mod naming;
pub mod overrides;
pub mod pattern;

pub use naming::{DynamicNaming, FixedNaming, HeaderLookup, NamingMode, SegmentNaming};
pub use overrides::{OverrideSources, NAME_OVERRIDE_ENV_VAR, NAME_OVERRIDE_PROPERTY_KEY};
pub use pattern::wildcard_match;
