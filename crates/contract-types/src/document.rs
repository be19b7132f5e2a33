use serde::{Deserialize, Serialize};

use crate::fields::ExtractedField;

/// Source document handed to the analysis pipeline by the collaborator.
///
/// Opaque bytes plus the declared MIME type. Created by the caller,
/// consumed once by the pipeline, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Byte size of the document content.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Outcome of recognizing and extracting a single page.
///
/// Immutable once produced, ordered by `page_number` (1-based,
/// contiguous). The empty variant marks a page that failed recognition
/// or extraction without aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub page_number: u32,
    pub raw_text: String,
    pub fields: Vec<ExtractedField>,
}

impl PageResult {
    pub fn new(page_number: u32, raw_text: String, fields: Vec<ExtractedField>) -> Self {
        Self {
            page_number,
            raw_text,
            fields,
        }
    }

    /// Placeholder for a page whose recognition or extraction failed.
    pub fn empty(page_number: u32) -> Self {
        Self {
            page_number,
            raw_text: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw_text.is_empty() && self.fields.is_empty()
    }
}

/// All pages of one analysis run folded into the view the validation
/// engine consumes: full text in page order and every extracted field,
/// duplicates retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedDocument {
    pub pages: Vec<PageResult>,
    pub all_raw_text: String,
    pub all_fields: Vec<ExtractedField>,
}

impl AggregatedDocument {
    /// Fold ordered page results. Page text is joined with a blank-line
    /// separator; fields concatenate in page order.
    pub fn from_pages(pages: Vec<PageResult>) -> Self {
        let all_raw_text = pages
            .iter()
            .map(|p| p.raw_text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let all_fields = pages.iter().flat_map(|p| p.fields.clone()).collect();
        Self {
            pages,
            all_raw_text,
            all_fields,
        }
    }
}
