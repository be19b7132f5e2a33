use contract_types::{ContractTemplate, ErrorKind, ExtractedField, Finding, Severity};

/// Flag every template-required field type with no extracted instance.
pub fn check_required_fields(
    fields: &[ExtractedField],
    template: &ContractTemplate,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for required in template.required_fields() {
        let present = fields.iter().any(|f| f.field_type == required);
        if !present {
            findings.push(
                Finding::new(
                    ErrorKind::RequiredFieldMissing,
                    required.as_str(),
                    Severity::Critical,
                    95,
                )
                .with_expected(format!("required field '{required}'"))
                .with_suggestion(format!(
                    "Check that the '{required}' field is present in the document"
                )),
            );
        }
    }

    findings
}
