//! Deterministic rule engine for contract validation.
//!
//! Consumes the field set and aggregated text produced by the OCR
//! pipeline plus a [`ContractTemplate`], and emits severity-ranked
//! [`Finding`]s. Validation is a pure function of its inputs: no state
//! survives a call, nothing here ever fails, and malformed values
//! become findings rather than errors. Alternative validators (e.g. a
//! model-backed analyzer) can sit beside this one by offering the same
//! `validate` signature.

pub mod checksum;
pub mod patterns;
pub mod rules;

use chrono::{NaiveDate, Utc};
use contract_types::{ContractTemplate, ExtractedField, Finding};

/// RuleEngine entry point
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validate extracted fields and aggregated text against a
    /// template, dating plausibility checks to the current day.
    pub fn validate(
        &self,
        fields: &[ExtractedField],
        full_text: &str,
        template: &ContractTemplate,
    ) -> Vec<Finding> {
        self.validate_at(fields, full_text, template, Utc::now().date_naive())
    }

    /// Same as [`validate`](Self::validate) with an injected "today",
    /// so date-window checks are reproducible.
    pub fn validate_at(
        &self,
        fields: &[ExtractedField],
        full_text: &str,
        template: &ContractTemplate,
        today: NaiveDate,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        findings.extend(rules::check_required_fields(fields, template));
        findings.extend(rules::check_formats(fields));
        findings.extend(rules::check_party_consistency(fields, template));
        findings.extend(rules::check_plan_pricing(fields, template));
        findings.extend(rules::check_date_plausibility(fields, today));
        findings.extend(rules::check_structure(full_text));

        findings
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
