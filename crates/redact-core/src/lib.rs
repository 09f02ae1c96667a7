//! Core document model for docredact
//!
//! This crate contains:
//! - Run-based document model (Document, Paragraph, Run)
//! - Opaque run formatting with typed highlight/color overrides
//! - Shared error types

pub mod document;
pub mod error;
pub mod formatting;

pub use document::{Document, Paragraph, Run};
pub use error::{Error, Result};
pub use formatting::{Formatting, Highlight, Property, Rgb};
