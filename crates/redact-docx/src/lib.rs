//! WordprocessingML persistence for docredact
//!
//! This crate provides:
//! - Zip package reading and writing, entry order preserved
//! - Mapping of the main document part onto the run-based document model
//! - Re-serialization of changed runs only; everything else is written back
//!   byte for byte

mod body;
pub mod error;
pub mod file;
mod package;
mod xml;

pub use error::{DocxError, Result};
pub use file::DocxFile;
