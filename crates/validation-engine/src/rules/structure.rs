use contract_types::{ErrorKind, Finding, Severity};

use crate::patterns::{STRUCTURE_KEYWORD_MINIMUM, STRUCTURE_KEYWORDS};

/// Structural completeness of the aggregated text: a real contract
/// mentions signatures, witnesses, clauses. Fewer than three of the
/// keyword set present yields a single finding listing what is missing.
pub fn check_structure(full_text: &str) -> Vec<Finding> {
    let text_lower = full_text.to_lowercase();

    let missing: Vec<&str> = STRUCTURE_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| !text_lower.contains(keyword))
        .collect();
    let present = STRUCTURE_KEYWORDS.len() - missing.len();

    if present >= STRUCTURE_KEYWORD_MINIMUM {
        return Vec::new();
    }

    vec![
        Finding::new(
            ErrorKind::Inconsistency,
            "estrutura",
            Severity::Medium,
            70,
        )
        .with_found(format!("{present} of {} structure keywords", STRUCTURE_KEYWORDS.len()))
        .with_expected("complete contract structure")
        .with_suggestion(format!(
            "Check that the document contains: {}",
            missing.join(", ")
        )),
    ]
}
