//! Page-oriented OCR pipeline: rasterize a PDF, recognize text per page,
//! and pull typed contract fields out of the recognized text.
//!
//! The pipeline tolerates per-page failures (a bad page yields an empty
//! [`contract_types::PageResult`]) and only aborts for document-level
//! problems: an unsupported format, a corrupt file, or a recognition
//! backend that cannot start at all.

use thiserror::Error;

pub mod extract;
pub mod pipeline;
pub mod progress;
pub mod rasterize;
pub mod recognize;

pub use extract::FieldExtractor;
pub use pipeline::{AnalysisPipeline, PipelineStage, DEFAULT_PAGE_WORKERS};
pub use progress::{NullProgress, ProgressSink};
pub use rasterize::{PageRasterizer, PdfiumRasterizer, RENDER_SCALE};
pub use recognize::{RecognitionError, TextRecognizer};

#[cfg(feature = "tesseract-ocr")]
pub use recognize::TesseractRecognizer;

/// Fatal, document-level pipeline failures. Anything page-local is
/// swallowed into an empty page result instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input does not look like a format this pipeline can read.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document claims to be a PDF but cannot be opened or its
    /// geometry cannot be resolved.
    #[error("corrupt document: {0}")]
    CorruptDocument(String),

    /// The recognition backend (or the rendering library it depends on)
    /// is not usable in this environment.
    #[error("recognition unavailable: {0}")]
    RecognitionUnavailable(String),
}
