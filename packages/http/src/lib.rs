//! Traceline HTTP — request naming middleware and instrumentation config.
//!
//! Wires the naming engine from `traceline-core` into an HTTP service:
//! [`InstrumentConfig`] selects and parameterizes a strategy, and
//! [`SegmentNameLayer`] applies it to every request flowing through a
//! `tower` stack.

pub mod config;
pub mod middleware;

pub use config::{build_naming, ConfigError, InstrumentConfig};
pub use middleware::{SegmentNameLayer, SegmentNameService};
