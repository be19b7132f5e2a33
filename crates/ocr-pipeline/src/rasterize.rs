//! PDF page rendering via Google PDFium.
//!
//! `PdfiumRasterizer` is stateless (`Send + Sync`). Each operation creates
//! a fresh `Pdfium` instance because the upstream type is `!Send`. The OS
//! caches `dlopen`/`LoadLibrary` calls, so repeat loads are near-free.

use std::io::Cursor;

use pdfium_render::prelude::*;
use tracing::{debug, warn};

use crate::PipelineError;

/// Fixed render scale over PDF points. An A4 page (595x842 pt) comes out
/// at roughly 1190x1684 px, enough for Tesseract to resolve contract type.
pub const RENDER_SCALE: f32 = 2.0;

/// Maximum dimension (width or height) for rendered page images.
/// Prevents OOM on extremely large pages.
const MAX_DIMENSION_PX: u32 = 4096;

/// Renders document pages to PNG images.
///
/// Implementations must be safe to call from blocking worker threads.
pub trait PageRasterizer: Send + Sync {
    /// Number of pages in the document. This is the pipeline's first
    /// touch of the bytes, so format and corruption errors surface here.
    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, PipelineError>;

    /// Render the zero-based `page_index` to an encoded PNG.
    fn render_page(&self, pdf_bytes: &[u8], page_index: usize) -> Result<Vec<u8>, PipelineError>;
}

/// PDFium-backed rasterizer.
///
/// Stateless: the `Pdfium` library handle is loaded per-operation because
/// the upstream `Pdfium` type is `!Send + !Sync`.
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    /// Create a new rasterizer, verifying the PDFium library is loadable.
    ///
    /// Discovery order:
    /// 1. `PDFIUM_DYNAMIC_LIB_PATH` env var (explicit path to library file)
    /// 2. Alongside the running executable
    /// 3. System library search paths
    pub fn new() -> Result<Self, PipelineError> {
        // Fail fast: a missing native library should abort the run before
        // any document work starts.
        let _ = load_pdfium()?;
        Ok(Self)
    }
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

fn load_pdfium() -> Result<Pdfium, PipelineError> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        debug!(path = %path, "loading PDFium from env var");
        let bindings = Pdfium::bind_to_library(&path).map_err(|e| {
            PipelineError::RecognitionUnavailable(format!(
                "failed to load PDFium from {path}: {e}"
            ))
        })?;
        return Ok(Pdfium::new(bindings));
    }

    // pdfium_platform_library_name_at_path() handles platform naming:
    //   Windows -> pdfium.dll | Linux -> libpdfium.so | macOS -> libpdfium.dylib
    if let Ok(exe) = std::env::current_exe() {
        if let Some(exe_dir) = exe.parent() {
            let lib_path =
                Pdfium::pdfium_platform_library_name_at_path(exe_dir.to_string_lossy().as_ref());
            if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
                debug!(dir = %exe_dir.display(), "loaded PDFium from executable directory");
                return Ok(Pdfium::new(bindings));
            }
        }
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|e| {
        PipelineError::RecognitionUnavailable(format!(
            "PDFium library not found; set PDFIUM_DYNAMIC_LIB_PATH or install PDFium: {e}"
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

fn map_load_error(e: PdfiumError) -> PipelineError {
    PipelineError::CorruptDocument(format!("failed to load PDF: {e}"))
}

/// Compute pixel dimensions for rendering at [`RENDER_SCALE`], applying
/// the dimension guard.
///
/// Returns (width_px, height_px), both clamped to [1, MAX_DIMENSION_PX].
/// Preserves aspect ratio when capping.
fn compute_render_dimensions(width_points: f32, height_points: f32) -> (u32, u32) {
    let raw_w = (width_points * RENDER_SCALE).max(1.0);
    let raw_h = (height_points * RENDER_SCALE).max(1.0);

    let max_dim = raw_w.max(raw_h);
    if max_dim > MAX_DIMENSION_PX as f32 {
        let ratio = MAX_DIMENSION_PX as f32 / max_dim;
        let w = ((raw_w * ratio) as u32).clamp(1, MAX_DIMENSION_PX);
        let h = ((raw_h * ratio) as u32).clamp(1, MAX_DIMENSION_PX);
        (w, h)
    } else {
        (raw_w as u32, raw_h as u32)
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, PipelineError> {
        if !has_pdf_header(pdf_bytes) {
            return Err(PipelineError::UnsupportedFormat(
                "missing %PDF header".to_string(),
            ));
        }
        let pdfium = load_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(map_load_error)?;
        Ok(document.pages().len() as usize)
    }

    fn render_page(&self, pdf_bytes: &[u8], page_index: usize) -> Result<Vec<u8>, PipelineError> {
        let pdfium = load_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(map_load_error)?;

        let pages = document.pages();

        let index = u16::try_from(page_index).map_err(|_| {
            PipelineError::CorruptDocument(format!("page index {page_index} exceeds u16 maximum"))
        })?;

        let page = pages.get(index).map_err(|_| {
            PipelineError::CorruptDocument(format!(
                "page {page_index} out of range (document has {} pages)",
                pages.len()
            ))
        })?;

        let width_points = page.width().value;
        let height_points = page.height().value;
        let (target_w, target_h) = compute_render_dimensions(width_points, height_points);

        let uncapped_w = (width_points * RENDER_SCALE) as u32;
        let uncapped_h = (height_points * RENDER_SCALE) as u32;
        if target_w != uncapped_w || target_h != uncapped_h {
            warn!(
                page = page_index,
                raw_width = uncapped_w,
                raw_height = uncapped_h,
                capped_width = target_w,
                capped_height = target_h,
                "page dimensions capped to {MAX_DIMENSION_PX}px",
            );
        }

        let config = PdfRenderConfig::new()
            .set_target_width(target_w as i32)
            .set_maximum_height(target_h as i32);

        let bitmap = page.render_with_config(&config).map_err(|e| {
            PipelineError::CorruptDocument(format!("rendering page {page_index} failed: {e}"))
        })?;

        let dynamic_image = bitmap.as_image();
        let mut cursor = Cursor::new(Vec::new());
        dynamic_image
            .write_to(&mut cursor, image::ImageFormat::Png)
            .map_err(|e| {
                PipelineError::CorruptDocument(format!(
                    "PNG encoding for page {page_index} failed: {e}"
                ))
            })?;

        let png_bytes = cursor.into_inner();

        debug!(
            page = page_index,
            width = target_w,
            height = target_h,
            png_size = png_bytes.len(),
            "rendered PDF page to PNG"
        );

        Ok(png_bytes)
    }
}
