//! Conversion outcome entities.

use serde::Serialize;

/// Final state of one URL attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    Done,
    Error,
}

/// Result of converting a single URL inside a batch.
///
/// Serialized into the `X-Results` response header, so the JSON keys follow
/// the browser client's naming (`pdfName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub url: String,
    pub status: ConversionStatus,
    #[serde(rename = "pdfName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    /// Creates a successful result.
    pub fn done(url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: ConversionStatus::Done,
            file_name: Some(file_name.into()),
            error: None,
        }
    }

    /// Creates a failed result.
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: ConversionStatus::Error,
            file_name: None,
            error: Some(error.into()),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == ConversionStatus::Done
    }
}

/// A rendered PDF together with the file name it should be saved under.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Everything a finished batch produces.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// One entry per input URL, in input order.
    pub results: Vec<ConversionResult>,
    /// Serialized ZIP archive of every successful render.
    pub archive: Vec<u8>,
}

impl BatchOutcome {
    pub fn summary(&self) -> BatchSummary {
        let successful = self.results.iter().filter(|r| r.is_done()).count();
        BatchSummary {
            total: self.results.len(),
            successful,
            failed: self.results.len() - successful,
        }
    }
}
