use contract_types::{ContractTemplate, ErrorKind, ExtractedField, FieldType, Finding, Severity};

/// Cross-field checks: party-identifier exclusivity and the loyalty
/// period tied to the party kind.
pub fn check_party_consistency(
    fields: &[ExtractedField],
    template: &ContractTemplate,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let has_cpf = fields.iter().any(|f| f.field_type == FieldType::Cpf);
    let has_cnpj = fields.iter().any(|f| f.field_type == FieldType::Cnpj);

    // A contract identifies exactly one party kind.
    if has_cpf && has_cnpj {
        findings.push(
            Finding::new(ErrorKind::Inconsistency, "cpf/cnpj", Severity::High, 90)
                .with_found("both CPF and CNPJ present")
                .with_expected("a single party identifier (CPF or CNPJ)")
                .with_suggestion("Check whether the contract is for an individual or a company"),
        );
    }

    // Later pages override earlier ones when a field repeats.
    let loyalty = fields
        .iter()
        .rev()
        .find(|f| f.field_type == FieldType::Other("fidelidade".to_string()))
        .map(|f| f.value.trim());
    let (cpf_months, cnpj_months) = template.loyalty_months();

    if let Some(loyalty) = loyalty {
        if has_cpf && loyalty != cpf_months.to_string() {
            findings.push(loyalty_mismatch(loyalty, cpf_months, "an individual (CPF)"));
        }
        if has_cnpj && loyalty != cnpj_months.to_string() {
            findings.push(loyalty_mismatch(loyalty, cnpj_months, "a company (CNPJ)"));
        }
    }

    findings
}

fn loyalty_mismatch(found: &str, expected_months: u32, party: &str) -> Finding {
    Finding::new(ErrorKind::Inconsistency, "fidelidade", Severity::High, 85)
        .with_found(found)
        .with_expected(format!("{expected_months} months for {party}"))
        .with_suggestion(format!(
            "Contracts for {party} carry a {expected_months}-month loyalty period"
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_types::TemplateKind;

    fn template() -> ContractTemplate {
        ContractTemplate::builtin(TemplateKind::Padrao)
    }

    fn field(t: FieldType, v: &str) -> ExtractedField {
        ExtractedField::new(t, v, 0.8)
    }

    #[test]
    fn test_cpf_and_cnpj_together_are_inconsistent() {
        let fields = vec![
            field(FieldType::Cpf, "111.444.777-35"),
            field(FieldType::Cnpj, "11.222.333/0001-81"),
        ];
        let findings = check_party_consistency(&fields, &template());
        assert!(findings
            .iter()
            .any(|f| f.kind == ErrorKind::Inconsistency
                && f.affected_field == "cpf/cnpj"
                && f.severity == Severity::High
                && f.confidence == 90));
    }

    #[test]
    fn test_loyalty_must_be_12_for_cpf() {
        let fields = vec![
            field(FieldType::Cpf, "111.444.777-35"),
            field(FieldType::Other("fidelidade".into()), "24"),
        ];
        let findings = check_party_consistency(&fields, &template());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].affected_field, "fidelidade");
        assert_eq!(findings[0].confidence, 85);
        assert_eq!(findings[0].found_value.as_deref(), Some("24"));
    }

    #[test]
    fn test_loyalty_must_be_24_for_cnpj() {
        let fields = vec![
            field(FieldType::Cnpj, "11.222.333/0001-81"),
            field(FieldType::Other("fidelidade".into()), "12"),
        ];
        let findings = check_party_consistency(&fields, &template());
        assert_eq!(findings.len(), 1);
        assert!(findings[0]
            .expected_value
            .as_deref()
            .unwrap()
            .contains("24"));
    }

    #[test]
    fn test_matching_loyalty_passes() {
        let fields = vec![
            field(FieldType::Cpf, "111.444.777-35"),
            field(FieldType::Other("fidelidade".into()), "12"),
        ];
        assert!(check_party_consistency(&fields, &template()).is_empty());
    }

    #[test]
    fn test_template_can_override_loyalty_constants() {
        use contract_types::ValidationRule;
        let mut template = template();
        template.rules = vec![ValidationRule::ConsistencyCheck {
            cpf_months: 6,
            cnpj_months: 36,
        }];
        let fields = vec![
            field(FieldType::Cpf, "111.444.777-35"),
            field(FieldType::Other("fidelidade".into()), "6"),
        ];
        assert!(check_party_consistency(&fields, &template).is_empty());
    }

    #[test]
    fn test_repeated_loyalty_uses_the_last_occurrence() {
        let fields = vec![
            field(FieldType::Cpf, "111.444.777-35"),
            field(FieldType::Other("fidelidade".into()), "24"),
            field(FieldType::Other("fidelidade".into()), "12"),
        ];
        assert!(check_party_consistency(&fields, &template()).is_empty());
    }

    #[test]
    fn test_loyalty_without_party_identifier_passes() {
        let fields = vec![field(FieldType::Other("fidelidade".into()), "99")];
        assert!(check_party_consistency(&fields, &template()).is_empty());
    }
}
