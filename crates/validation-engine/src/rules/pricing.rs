use contract_types::{ContractTemplate, ErrorKind, ExtractedField, FieldType, Finding, Severity};
use tracing::debug;

use crate::patterns::parse_currency;

/// Mismatch tolerance for plan price comparison.
const PRICE_TOLERANCE: f64 = 0.01;

/// Compare the contract's monetary value against the template's price
/// for the named plan (exact match on the lower-cased plan name).
///
/// Runs only when both a `plano` field and a currency value are
/// present. An unparseable amount is not flagged here: it necessarily
/// fails the currency shape check in the format family, which already
/// produced an `InvalidFormat` finding for it.
pub fn check_plan_pricing(
    fields: &[ExtractedField],
    template: &ContractTemplate,
) -> Vec<Finding> {
    // Later pages override earlier ones when a field repeats.
    let plan = fields
        .iter()
        .rev()
        .find(|f| f.field_type == FieldType::Other("plano".to_string()))
        .map(|f| f.value.trim());
    let amount = fields
        .iter()
        .rev()
        .find(|f| f.field_type == FieldType::CurrencyValue)
        .map(|f| f.value.as_str());

    let (Some(plan), Some(amount)) = (plan, amount) else {
        return Vec::new();
    };

    let Some(found) = parse_currency(amount) else {
        debug!(value = amount, "plan price skipped: amount did not parse");
        return Vec::new();
    };

    let Some(expected) = template.plan_price(plan) else {
        // Unknown plan names are not an error; templates price what
        // they know about.
        return Vec::new();
    };

    if (found - expected).abs() > PRICE_TOLERANCE {
        return vec![
            Finding::new(ErrorKind::IncorrectValue, "valor", Severity::High, 90)
                .with_found(amount)
                .with_expected(format!("R$ {expected:.2}"))
                .with_suggestion(format!(
                    "The '{}' plan should cost R$ {expected:.2}",
                    plan.to_lowercase()
                )),
        ];
    }

    Vec::new()
}
