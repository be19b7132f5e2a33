use serde::{Deserialize, Serialize};

use crate::fields::FieldType;

/// Built-in contract template kinds, matching the model types the
/// legacy system shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    PrestacaoServicos,
    Locacao,
    CompraVenda,
    Padrao,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::PrestacaoServicos => "prestacao_servicos",
            TemplateKind::Locacao => "locacao",
            TemplateKind::CompraVenda => "compra_venda",
            TemplateKind::Padrao => "default",
        }
    }

    /// Parse a template identifier (case-insensitive).
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prestacao_servicos" => Some(TemplateKind::PrestacaoServicos),
            "locacao" => Some(TemplateKind::Locacao),
            "compra_venda" => Some(TemplateKind::CompraVenda),
            "default" | "padrao" => Some(TemplateKind::Padrao),
            _ => None,
        }
    }

    /// Required field set for this contract kind.
    pub fn required_fields(&self) -> Vec<FieldType> {
        match self {
            TemplateKind::PrestacaoServicos => vec![
                FieldType::Cpf,
                FieldType::Cnpj,
                FieldType::Email,
                FieldType::CurrencyValue,
            ],
            TemplateKind::Locacao => {
                vec![FieldType::Cpf, FieldType::CurrencyValue, FieldType::Date]
            }
            TemplateKind::CompraVenda => {
                vec![FieldType::Cpf, FieldType::Cnpj, FieldType::CurrencyValue]
            }
            TemplateKind::Padrao => vec![FieldType::Cpf, FieldType::Email],
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One strongly-typed validation rule carried by a template.
///
/// The legacy system kept these as an untyped JSON blob interpreted ad
/// hoc inside the engine; here the rule set is a closed tagged enum
/// deserialized once at the collaborator boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationRule {
    /// The field type must be present in the extracted set.
    RequiredField { field: FieldType },
    /// Shape/check-digit validation for the field type. Known types are
    /// format-checked whenever present regardless; this rule exists so
    /// templates can state the expectation explicitly.
    FormatCheck { field: FieldType },
    /// Loyalty-period months expected per party kind (`fidelidade`
    /// must equal `cpf_months` for a CPF party, `cnpj_months` for a
    /// CNPJ party).
    ConsistencyCheck { cpf_months: u32, cnpj_months: u32 },
    /// Expected price for a plan name (matched on the lower-cased
    /// plan string).
    PricingCheck { plan: String, expected: f64 },
}

/// Names the fields a contract type must contain
/// and what rules its values must satisfy.
///
/// Owned and persisted by the collaborator; passed by value into the
/// validation engine per call and never mutated by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTemplate {
    pub id: String,
    pub name: String,
    pub required_field_types: Vec<FieldType>,
    #[serde(default)]
    pub rules: Vec<ValidationRule>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ContractTemplate {
    /// Built-in template for one of the stock contract kinds, carrying
    /// the stock loyalty and pricing rules.
    pub fn builtin(kind: TemplateKind) -> Self {
        let mut rules: Vec<ValidationRule> = kind
            .required_fields()
            .into_iter()
            .map(|field| ValidationRule::RequiredField { field })
            .collect();
        rules.push(ValidationRule::ConsistencyCheck {
            cpf_months: 12,
            cnpj_months: 24,
        });
        for (plan, expected) in DEFAULT_PLAN_PRICES {
            rules.push(ValidationRule::PricingCheck {
                plan: plan.to_string(),
                expected: *expected,
            });
        }

        Self {
            id: kind.as_str().to_string(),
            name: kind.as_str().to_string(),
            required_field_types: kind.required_fields(),
            rules,
            active: true,
        }
    }

    /// Union of the explicit required set and any `RequiredField` rules.
    pub fn required_fields(&self) -> Vec<FieldType> {
        let mut required = self.required_field_types.clone();
        for rule in &self.rules {
            if let ValidationRule::RequiredField { field } = rule {
                if !required.contains(field) {
                    required.push(field.clone());
                }
            }
        }
        required
    }

    /// Expected price for a plan name, if the template prices it.
    pub fn plan_price(&self, plan: &str) -> Option<f64> {
        let plan = plan.to_lowercase();
        self.rules.iter().find_map(|rule| match rule {
            ValidationRule::PricingCheck { plan: p, expected } if p.to_lowercase() == plan => {
                Some(*expected)
            }
            _ => None,
        })
    }

    /// Loyalty-period months expected for CPF and CNPJ parties.
    /// Falls back to the stock 12/24 split when the template carries no
    /// consistency rule.
    pub fn loyalty_months(&self) -> (u32, u32) {
        self.rules
            .iter()
            .find_map(|rule| match rule {
                ValidationRule::ConsistencyCheck {
                    cpf_months,
                    cnpj_months,
                } => Some((*cpf_months, *cnpj_months)),
                _ => None,
            })
            .unwrap_or((12, 24))
    }
}

/// Stock plan pricing table (plan name, expected monthly price).
pub const DEFAULT_PLAN_PRICES: &[(&str, f64)] = &[
    ("basico", 49.90),
    ("intermediario", 79.90),
    ("premium", 129.90),
    ("empresarial", 199.90),
];
