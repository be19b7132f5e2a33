use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Four-level ranking used to prioritize findings for human review.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        write!(f, "{s}")
    }
}

/// What class of discrepancy a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RequiredFieldMissing,
    InvalidFormat,
    Inconsistency,
    IncorrectValue,
}

/// A single detected discrepancy between extracted contract data and a
/// template's expectations. Created exclusively by the validation
/// engine; immutable; never outlives its producing validation call
/// (persistence is the caller's concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: Uuid,
    pub kind: ErrorKind,
    pub affected_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub severity: Severity,
    /// Heuristic certainty 0-100; not a calibrated probability.
    pub confidence: u8,
}

impl Finding {
    pub fn new(
        kind: ErrorKind,
        affected_field: impl Into<String>,
        severity: Severity,
        confidence: u8,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            affected_field: affected_field.into(),
            found_value: None,
            expected_value: None,
            suggestion: None,
            severity,
            confidence,
        }
    }

    pub fn with_found(mut self, value: impl Into<String>) -> Self {
        self.found_value = Some(value.into());
        self
    }

    pub fn with_expected(mut self, value: impl Into<String>) -> Self {
        self.expected_value = Some(value.into());
        self
    }

    pub fn with_suggestion(mut self, value: impl Into<String>) -> Self {
        self.suggestion = Some(value.into());
        self
    }
}

/// Summary totals derived from one validation run's findings.
///
/// Always built through [`AnalysisResult::from_findings`] so that
/// `total_errors == findings.len()` and the severity buckets reconcile
/// by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_errors: usize,
    pub severity_counts: BTreeMap<Severity, usize>,
    pub processing_time_seconds: f64,
}

impl AnalysisResult {
    pub fn from_findings(findings: &[Finding], processing_time_seconds: f64) -> Self {
        let mut severity_counts = BTreeMap::new();
        for finding in findings {
            *severity_counts.entry(finding.severity).or_insert(0) += 1;
        }
        Self {
            total_errors: findings.len(),
            severity_counts,
            processing_time_seconds,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.severity_counts.get(&severity).copied().unwrap_or(0)
    }
}
