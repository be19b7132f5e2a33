use chrono::{Months, NaiveDate};
use contract_types::{ErrorKind, ExtractedField, FieldType, Finding, Severity};

/// Plausibility window for contract dates, evaluated when the document
/// carries more than one date. Each date is judged independently
/// against [today - 1 year, today + 2 years]; dates are never compared
/// pairwise.
pub fn check_date_plausibility(fields: &[ExtractedField], today: NaiveDate) -> Vec<Finding> {
    let dates: Vec<&ExtractedField> = fields
        .iter()
        .filter(|f| f.field_type == FieldType::Date)
        .collect();
    if dates.len() < 2 {
        return Vec::new();
    }

    let lower = today - Months::new(12);
    let upper = today + Months::new(24);

    let mut findings = Vec::new();
    for field in dates {
        match NaiveDate::parse_from_str(field.value.trim(), "%d/%m/%Y") {
            Ok(date) => {
                if date < lower || date > upper {
                    findings.push(
                        Finding::new(ErrorKind::IncorrectValue, "data", Severity::Medium, 75)
                            .with_found(field.value.clone())
                            .with_expected(format!(
                                "date between {} and {}",
                                lower.format("%d/%m/%Y"),
                                upper.format("%d/%m/%Y")
                            ))
                            .with_suggestion("Check whether the date is correct"),
                    );
                }
            }
            Err(_) => {
                // Matches the DD/MM/YYYY shape but is not a calendar
                // date (e.g. 31/02/2026).
                findings.push(
                    Finding::new(ErrorKind::InvalidFormat, "data", Severity::Medium, 75)
                        .with_found(field.value.clone())
                        .with_expected("calendar date (DD/MM/AAAA)")
                        .with_suggestion("Check the day and month of the date"),
                );
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(v: &str) -> ExtractedField {
        ExtractedField::new(FieldType::Date, v, 0.8)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn test_single_date_is_not_evaluated() {
        let fields = vec![date("01/01/1990")];
        assert!(check_date_plausibility(&fields, today()).is_empty());
    }

    #[test]
    fn test_too_old_date_is_flagged() {
        let fields = vec![date("01/01/2024"), date("01/07/2026")];
        let findings = check_date_plausibility(&fields, today());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ErrorKind::IncorrectValue);
        assert_eq!(findings[0].found_value.as_deref(), Some("01/01/2024"));
        assert_eq!(findings[0].confidence, 75);
    }

    #[test]
    fn test_far_future_date_is_flagged() {
        let fields = vec![date("01/07/2026"), date("01/07/2029")];
        let findings = check_date_plausibility(&fields, today());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].found_value.as_deref(), Some("01/07/2029"));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        // Exactly one year back and two years forward.
        let fields = vec![date("15/06/2025"), date("15/06/2028")];
        assert!(check_date_plausibility(&fields, today()).is_empty());
    }

    #[test]
    fn test_impossible_calendar_date_is_a_format_finding() {
        let fields = vec![date("31/02/2026"), date("01/07/2026")];
        let findings = check_date_plausibility(&fields, today());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_each_date_judged_independently() {
        let fields = vec![date("01/01/2020"), date("01/01/2040")];
        let findings = check_date_plausibility(&fields, today());
        assert_eq!(findings.len(), 2);
    }
}
