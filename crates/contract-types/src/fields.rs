use serde::{Deserialize, Serialize};

/// Closed set of field kinds the extractor battery knows how to find.
///
/// Wire names match the original Portuguese field identifiers stored in
/// templates (`nome`, `telefone`, `valor`, `data`), so templates written
/// against the old system keep deserializing. Field kinds the battery
/// never emits but a template may reference (e.g. `fidelidade`, `plano`)
/// round-trip through the `Other` arm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Name,
    Email,
    Phone,
    Cpf,
    Cnpj,
    Cep,
    CurrencyValue,
    Date,
    Other(String),
}

impl FieldType {
    /// Wire identifier for this field kind.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Name => "nome",
            FieldType::Email => "email",
            FieldType::Phone => "telefone",
            FieldType::Cpf => "cpf",
            FieldType::Cnpj => "cnpj",
            FieldType::Cep => "cep",
            FieldType::CurrencyValue => "valor",
            FieldType::Date => "data",
            FieldType::Other(s) => s,
        }
    }

    /// Parse a wire identifier (case-insensitive). Unknown identifiers
    /// become `Other` rather than an error: the engine passes them
    /// through unvalidated.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nome" | "name" => FieldType::Name,
            "email" => FieldType::Email,
            "telefone" | "phone" => FieldType::Phone,
            "cpf" => FieldType::Cpf,
            "cnpj" => FieldType::Cnpj,
            "cep" => FieldType::Cep,
            "valor" => FieldType::CurrencyValue,
            "data" => FieldType::Date,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        FieldType::parse(&s)
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single typed value pulled out of raw OCR text.
///
/// Fields carry no uniqueness invariant: two dates, or the same token
/// matched by two different patterns (a CEP that also looks like a
/// phone number), legitimately coexist. Disambiguation, if any, is the
/// validation engine's problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: String,
    /// Per-matcher reliability constant in [0, 1]. Heuristic and
    /// informational only; nothing downstream thresholds on it.
    pub confidence: f32,
}

impl ExtractedField {
    pub fn new(field_type: FieldType, value: impl Into<String>, confidence: f32) -> Self {
        Self {
            field_type,
            value: value.into(),
            confidence,
        }
    }
}
