use contract_types::{ErrorKind, ExtractedField, FieldType, Finding, Severity};

use crate::checksum::{clean_digits, cnpj_is_valid, cpf_is_valid};
use crate::patterns::{CEP_RE, CURRENCY_RE, EMAIL_RE, PHONE_RE};

/// Shape and check-digit validation for every present field of a known
/// type. Name, date and unknown (`Other`) fields pass through; date
/// plausibility has its own rule family.
pub fn check_formats(fields: &[ExtractedField]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for field in fields {
        match &field.field_type {
            FieldType::Cpf => {
                if !cpf_is_valid(&clean_digits(&field.value)) {
                    findings.push(
                        invalid(field, Severity::High, 90)
                            .with_expected("valid CPF (xxx.xxx.xxx-xx)")
                            .with_suggestion("Check that every digit of the CPF is correct"),
                    );
                }
            }
            FieldType::Cnpj => {
                if !cnpj_is_valid(&clean_digits(&field.value)) {
                    findings.push(
                        invalid(field, Severity::High, 90)
                            .with_expected("valid CNPJ (xx.xxx.xxx/xxxx-xx)")
                            .with_suggestion("Check that every digit of the CNPJ is correct"),
                    );
                }
            }
            FieldType::Email => {
                if !EMAIL_RE.is_match(&field.value) {
                    findings.push(
                        invalid(field, Severity::Medium, 85)
                            .with_expected("valid email (exemplo@dominio.com)")
                            .with_suggestion("Check that the email has an @ and a valid domain"),
                    );
                }
            }
            FieldType::Phone => {
                let compact: String =
                    field.value.chars().filter(|c| !c.is_whitespace()).collect();
                if !PHONE_RE.is_match(&compact) {
                    findings.push(
                        invalid(field, Severity::Medium, 80)
                            .with_expected("Brazilian phone ((xx) xxxxx-xxxx)")
                            .with_suggestion(
                                "Check that the phone has an area code and a full number",
                            ),
                    );
                }
            }
            FieldType::Cep => {
                if !CEP_RE.is_match(&field.value) {
                    findings.push(
                        invalid(field, Severity::Low, 75)
                            .with_expected("valid CEP (xxxxx-xxx)")
                            .with_suggestion("Check that the CEP has 8 digits"),
                    );
                }
            }
            FieldType::CurrencyValue => {
                if !CURRENCY_RE.is_match(field.value.trim()) {
                    findings.push(
                        invalid(field, Severity::Medium, 80)
                            .with_expected("monetary amount (R$ 1.000,00)")
                            .with_suggestion("Check the currency format"),
                    );
                }
            }
            FieldType::Name | FieldType::Date | FieldType::Other(_) => {}
        }
    }

    findings
}

fn invalid(field: &ExtractedField, severity: Severity, confidence: u8) -> Finding {
    Finding::new(
        ErrorKind::InvalidFormat,
        field.field_type.as_str(),
        severity,
        confidence,
    )
    .with_found(field.value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn one(field_type: FieldType, value: &str) -> Vec<ExtractedField> {
        vec![ExtractedField::new(field_type, value, 0.8)]
    }

    #[test]
    fn test_invalid_cpf_is_high_90() {
        let findings = check_formats(&one(FieldType::Cpf, "123.456.789-00"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ErrorKind::InvalidFormat);
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].confidence, 90);
        assert_eq!(findings[0].found_value.as_deref(), Some("123.456.789-00"));
    }

    #[test]
    fn test_valid_documents_pass() {
        let fields = vec![
            ExtractedField::new(FieldType::Cpf, "111.444.777-35", 0.8),
            ExtractedField::new(FieldType::Cnpj, "11.222.333/0001-81", 0.8),
            ExtractedField::new(FieldType::Email, "parte@exemplo.com.br", 0.85),
            ExtractedField::new(FieldType::Phone, "(11) 98765-4321", 0.75),
            ExtractedField::new(FieldType::Cep, "01310-100", 0.75),
            ExtractedField::new(FieldType::CurrencyValue, "R$ 1.234,56", 0.8),
        ];
        assert!(check_formats(&fields).is_empty());
    }

    #[test]
    fn test_severity_ladder_per_type() {
        let findings = check_formats(&vec![
            ExtractedField::new(FieldType::Cnpj, "11.222.333/0001-00", 0.8),
            ExtractedField::new(FieldType::Email, "sem-arroba", 0.85),
            ExtractedField::new(FieldType::Phone, "123", 0.75),
            ExtractedField::new(FieldType::Cep, "123", 0.75),
        ]);
        let severities: Vec<Severity> = findings.iter().map(|f| f.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::High, Severity::Medium, Severity::Medium, Severity::Low]
        );
        let confidences: Vec<u8> = findings.iter().map(|f| f.confidence).collect();
        assert_eq!(confidences, vec![90, 85, 80, 75]);
    }

    #[test]
    fn test_malformed_currency_is_flagged() {
        let findings = check_formats(&one(FieldType::CurrencyValue, "R$ --"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert_eq!(findings[0].confidence, 80);
    }

    #[test]
    fn test_unknown_and_name_fields_pass_through() {
        let fields = vec![
            ExtractedField::new(FieldType::Other("fidelidade".into()), "36", 1.0),
            ExtractedField::new(FieldType::Name, "X", 0.6),
        ];
        assert!(check_formats(&fields).is_empty());
    }
}
