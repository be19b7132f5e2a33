//! Shared data model for the contract analysis monolith
//!
//! Everything the OCR pipeline produces and the validation engine
//! consumes lives here, so the two can evolve independently of the
//! collaborator that persists or displays results.

pub mod document;
pub mod fields;
pub mod findings;
pub mod template;

pub use document::{AggregatedDocument, Document, PageResult};
pub use fields::{ExtractedField, FieldType};
pub use findings::{AnalysisResult, ErrorKind, Finding, Severity};
pub use template::{ContractTemplate, TemplateKind, ValidationRule};
