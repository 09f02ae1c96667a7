//! Pattern redaction engine
//!
//! Reconciles regex matches with run-based text: each run's matches are
//! resolved into a segment plan, the run is split at the plan's interior
//! boundaries, and matched segments are replaced and recolored.

pub mod error;
pub mod palette;
pub mod patterns;
pub mod redactor;
pub mod resolver;
pub mod splitter;

pub use error::{EngineError, Result};
pub use palette::{RedactionColor, RedactionStyle};
pub use patterns::PatternSet;
pub use redactor::{RedactionReport, Redactor, redact};
pub use resolver::{SegmentPlan, resolve};
pub use splitter::split_run;
