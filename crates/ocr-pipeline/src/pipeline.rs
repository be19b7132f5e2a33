//! Orchestrates rasterization, recognition and extraction over a whole
//! document.
//!
//! Pages run on blocking worker threads in bounded batches. A failed page
//! becomes an empty [`PageResult`] instead of sinking the run; only
//! document-level problems (bad format, corrupt file, dead backend)
//! surface as errors.

use std::sync::Arc;
use std::time::Instant;

use contract_types::{AggregatedDocument, Document, PageResult};
use tracing::{debug, warn};

use crate::extract::FieldExtractor;
use crate::progress::{MonotonicProgress, ProgressSink};
use crate::rasterize::PageRasterizer;
use crate::recognize::TextRecognizer;
use crate::PipelineError;

/// Blocking page workers to run at once. Two keeps a laptop responsive
/// while still overlapping PDFium rendering with Tesseract recognition.
pub const DEFAULT_PAGE_WORKERS: usize = 2;

const PDF_MIME: &str = "application/pdf";

// Progress bands: geometry resolution up to 20, per-page work up to 80,
// aggregation closes at 100.
const GEOMETRY_START: u8 = 10;
const PAGE_BAND_START: u8 = 20;
const PAGE_BAND_SPAN: usize = 60;

/// Lifecycle of one document run, used as structured-log labels.
/// `Failed` covers the fatal error returns; page-local failures never
/// leave the `Recognizing`/`Extracting` phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Rasterizing,
    Recognizing,
    Extracting,
    Aggregated,
    Failed,
}

/// End-to-end page analysis: render, recognize, extract, aggregate.
pub struct AnalysisPipeline {
    rasterizer: Arc<dyn PageRasterizer>,
    recognizer: Arc<dyn TextRecognizer>,
    extractor: FieldExtractor,
    page_workers: usize,
}

impl AnalysisPipeline {
    pub fn new(rasterizer: Arc<dyn PageRasterizer>, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            rasterizer,
            recognizer,
            extractor: FieldExtractor::new(),
            page_workers: DEFAULT_PAGE_WORKERS,
        }
    }

    /// Override the worker bound. Clamped to at least one.
    pub fn with_page_workers(mut self, workers: usize) -> Self {
        self.page_workers = workers.max(1);
        self
    }

    /// Process every page of `document`, reporting coarse progress to
    /// `sink`. Output is ordered by page number, one entry per page,
    /// failed pages included as empty results.
    pub async fn process(
        &self,
        document: &Document,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<PageResult>, PipelineError> {
        let started = Instant::now();
        let progress = MonotonicProgress::new(sink);

        if !document.mime_type.eq_ignore_ascii_case(PDF_MIME) {
            return Err(PipelineError::UnsupportedFormat(format!(
                "declared MIME type {:?}, expected {PDF_MIME}",
                document.mime_type
            )));
        }

        debug!(
            stage = ?PipelineStage::Rasterizing,
            document = %document.name,
            bytes = document.size(),
            "resolving document geometry"
        );
        progress.report(GEOMETRY_START);

        let bytes: Arc<Vec<u8>> = Arc::new(document.content.clone());
        let page_count = self.rasterizer.page_count(&bytes)?;
        if page_count == 0 {
            return Err(PipelineError::CorruptDocument(
                "document has no pages".to_string(),
            ));
        }

        self.recognizer
            .warm_up()
            .map_err(|e| PipelineError::RecognitionUnavailable(e.to_string()))?;
        progress.report(PAGE_BAND_START);

        debug!(
            stage = ?PipelineStage::Recognizing,
            pages = page_count,
            workers = self.page_workers,
            "processing pages"
        );

        let indices: Vec<usize> = (0..page_count).collect();
        let mut pages = Vec::with_capacity(page_count);
        let mut done = 0usize;

        for batch in indices.chunks(self.page_workers) {
            let mut handles = Vec::with_capacity(batch.len());
            for &index in batch {
                let rasterizer = Arc::clone(&self.rasterizer);
                let recognizer = Arc::clone(&self.recognizer);
                let extractor = self.extractor;
                let bytes = Arc::clone(&bytes);
                handles.push(tokio::task::spawn_blocking(move || {
                    process_one(&*rasterizer, &*recognizer, extractor, &bytes, index)
                }));
            }

            // Joining in spawn order keeps the output in page order even
            // when workers finish out of order.
            for (handle, &index) in handles.into_iter().zip(batch) {
                let page = match handle.await {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(page = index + 1, error = %e, "page worker aborted, emitting empty page");
                        PageResult::empty((index + 1) as u32)
                    }
                };
                pages.push(page);
                done += 1;
                progress.report(PAGE_BAND_START + ((done * PAGE_BAND_SPAN) / page_count) as u8);
            }
        }

        debug!(
            stage = ?PipelineStage::Aggregated,
            pages = pages.len(),
            blank = pages.iter().filter(|p| p.is_blank()).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "document processed"
        );
        progress.report(100);

        Ok(pages)
    }

    /// [`Self::process`] plus the fold into the validation engine's input.
    pub async fn process_aggregated(
        &self,
        document: &Document,
        sink: &dyn ProgressSink,
    ) -> Result<AggregatedDocument, PipelineError> {
        let pages = self.process(document, sink).await?;
        Ok(AggregatedDocument::from_pages(pages))
    }
}

fn process_one(
    rasterizer: &dyn PageRasterizer,
    recognizer: &dyn TextRecognizer,
    extractor: FieldExtractor,
    bytes: &[u8],
    index: usize,
) -> PageResult {
    let page_number = (index + 1) as u32;

    let png = match rasterizer.render_page(bytes, index) {
        Ok(png) => png,
        Err(e) => {
            warn!(page = page_number, error = %e, "rasterization failed, page skipped");
            return PageResult::empty(page_number);
        }
    };

    let raw_text = match recognizer.recognize(&png) {
        Ok(text) => text,
        Err(e) => {
            warn!(page = page_number, error = %e, "recognition failed, page skipped");
            return PageResult::empty(page_number);
        }
    };

    let fields = extractor.extract(&raw_text);
    debug!(
        stage = ?crate::PipelineStage::Extracting,
        page = page_number,
        chars = raw_text.len(),
        fields = fields.len(),
        "page processed"
    );
    PageResult::new(page_number, raw_text, fields)
}
