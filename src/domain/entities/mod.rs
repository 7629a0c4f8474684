//! Core domain entities.
//!
//! Plain request-scoped data structures; nothing here outlives one HTTP
//! response.
//!
//! - [`ConversionResult`] - Per-URL outcome of a batch
//! - [`RenderedPdf`] - Output of a single conversion
//! - [`BatchOutcome`] - Results plus the serialized archive

pub mod conversion;

pub use conversion::{
    BatchOutcome, BatchSummary, ConversionResult, ConversionStatus, RenderedPdf,
};
