//! Text recognition over rendered page images.
//!
//! The pipeline talks to a [`TextRecognizer`] trait so tests and callers
//! without a system Tesseract install can supply their own backend. The
//! real backend lives behind the `tesseract-ocr` cargo feature.

use thiserror::Error;

/// Recognition failures, split by whether the whole run is doomed.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The backend cannot start at all (missing library, missing
    /// traineddata). Fatal for the document.
    #[error("recognition backend unavailable: {0}")]
    Unavailable(String),

    /// Recognition of a single image failed. Page-local.
    #[error("recognition failed: {0}")]
    Failed(String),
}

/// Turns an encoded page image (PNG) into raw text.
///
/// Implementations must be safe to call from blocking worker threads.
pub trait TextRecognizer: Send + Sync {
    /// One-time readiness check before any page is processed. A failure
    /// here aborts the document instead of producing N empty pages.
    fn warm_up(&self) -> Result<(), RecognitionError> {
        Ok(())
    }

    /// Recognize the text on one page image.
    fn recognize(&self, page_png: &[u8]) -> Result<String, RecognitionError>;
}

/// Tesseract-backed recognizer.
///
/// Stateless per call: a fresh `Tesseract` handle is created for every
/// page because the upstream handle is consumed by its builder API and
/// is not `Sync`.
#[cfg(feature = "tesseract-ocr")]
pub struct TesseractRecognizer {
    lang: String,
    tessdata_dir: Option<std::path::PathBuf>,
}

#[cfg(feature = "tesseract-ocr")]
impl TesseractRecognizer {
    /// Recognizer for the given language code (e.g. `"por"`), using the
    /// system tessdata location (`TESSDATA_PREFIX` or the install default).
    pub fn new(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            tessdata_dir: None,
        }
    }

    /// Point at an explicit tessdata directory instead of the system one.
    pub fn with_tessdata(mut self, dir: &std::path::Path) -> Self {
        self.tessdata_dir = Some(dir.to_path_buf());
        self
    }

    fn init(&self) -> Result<tesseract::Tesseract, RecognitionError> {
        let tessdata = match &self.tessdata_dir {
            Some(dir) => Some(dir.to_str().ok_or_else(|| {
                RecognitionError::Unavailable("tessdata path is not valid UTF-8".to_string())
            })?),
            None => None,
        };
        tesseract::Tesseract::new(tessdata, Some(&self.lang))
            .map_err(|e| RecognitionError::Unavailable(format!("{e:?}")))
    }
}

#[cfg(feature = "tesseract-ocr")]
impl TextRecognizer for TesseractRecognizer {
    fn warm_up(&self) -> Result<(), RecognitionError> {
        let _ = self.init()?;
        Ok(())
    }

    fn recognize(&self, page_png: &[u8]) -> Result<String, RecognitionError> {
        let tess = self.init()?;
        let mut tess = tess
            .set_image_from_mem(page_png)
            .map_err(|e| RecognitionError::Failed(format!("{e:?}")))?;
        let text = tess
            .get_text()
            .map_err(|e| RecognitionError::Failed(format!("{e:?}")))?;

        let confidence = tess.mean_text_conf().max(0);
        tracing::debug!(
            mean_confidence = confidence,
            chars = text.len(),
            "recognized page text"
        );

        Ok(text)
    }
}
