//! Regex battery that lifts typed contract fields out of recognized text.
//!
//! Every matcher runs over the full page text independently; a token that
//! satisfies two shapes (an 8-digit CEP also looks like a local phone
//! number) is deliberately reported under both types and left to the
//! validation layer to reconcile. No deduplication happens here.

use contract_types::{ExtractedField, FieldType};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CPF_RE: Regex = Regex::new(r"\b\d{3}\.?\d{3}\.?\d{3}-?\d{2}\b").unwrap();
    static ref CNPJ_RE: Regex =
        Regex::new(r"\b\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2}\b").unwrap();
    static ref EMAIL_RE: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    // The boundary sits before the digit run, not the whole match: a
    // boundary can never precede "(", and anchoring the digits keeps
    // longer digit runs (a bare CPF) from yielding phone fields.
    static ref PHONE_RE: Regex = Regex::new(r"(?:\(\d{2}\)[ \t]?)?\b\d{4,5}-?\d{4}\b").unwrap();
    static ref CURRENCY_RE: Regex =
        Regex::new(r"R\$\s*\d{1,3}(?:\.\d{3})*(?:,\d{2})?").unwrap();
    static ref DATE_RE: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap();
    static ref CEP_RE: Regex = Regex::new(r"\b\d{5}-?\d{3}\b").unwrap();
    // Capitalized multi-word run at line start, accented letters
    // included. Separators are space/tab only, so a match never crosses
    // a line break; the run may be followed by prose on the same line
    // ("Fulano de Tal, brasileiro, casado..."). A crude heuristic,
    // hence the low confidence.
    static ref NAME_RE: Regex = Regex::new(
        r"(?m)^[A-ZÀ-Ú][a-zà-ú]+(?:[ \t]+(?:d[aeo]s?[ \t]+)?[A-ZÀ-Ú][a-zà-ú]+)+"
    )
    .unwrap();
}

const CPF_CONFIDENCE: f32 = 0.80;
const CNPJ_CONFIDENCE: f32 = 0.80;
const EMAIL_CONFIDENCE: f32 = 0.85;
const PHONE_CONFIDENCE: f32 = 0.75;
const CURRENCY_CONFIDENCE: f32 = 0.80;
const DATE_CONFIDENCE: f32 = 0.80;
const CEP_CONFIDENCE: f32 = 0.75;
const NAME_CONFIDENCE: f32 = 0.60;

/// Name candidates shorter than this are rejected (single given names,
/// OCR fragments); longer ones are almost certainly headings or clauses.
const NAME_MIN_CHARS: usize = 10;
const NAME_MAX_CHARS: usize = 60;

/// Stateless field extractor. Cheap to copy into worker closures.
#[derive(Clone, Copy, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run the full battery over one page's raw text.
    ///
    /// Match order is fixed (documents, contacts, values, dates, names)
    /// so output is deterministic for a given input.
    pub fn extract(&self, raw_text: &str) -> Vec<ExtractedField> {
        let mut fields = Vec::new();

        collect(&mut fields, raw_text, &CPF_RE, FieldType::Cpf, CPF_CONFIDENCE);
        collect(&mut fields, raw_text, &CNPJ_RE, FieldType::Cnpj, CNPJ_CONFIDENCE);
        collect(&mut fields, raw_text, &EMAIL_RE, FieldType::Email, EMAIL_CONFIDENCE);
        collect(&mut fields, raw_text, &PHONE_RE, FieldType::Phone, PHONE_CONFIDENCE);
        collect(&mut fields, raw_text, &CEP_RE, FieldType::Cep, CEP_CONFIDENCE);
        collect(
            &mut fields,
            raw_text,
            &CURRENCY_RE,
            FieldType::CurrencyValue,
            CURRENCY_CONFIDENCE,
        );
        collect(&mut fields, raw_text, &DATE_RE, FieldType::Date, DATE_CONFIDENCE);

        for m in NAME_RE.find_iter(raw_text) {
            let candidate = m.as_str().trim();
            let len = candidate.chars().count();
            if len > NAME_MIN_CHARS && len < NAME_MAX_CHARS {
                fields.push(ExtractedField {
                    field_type: FieldType::Name,
                    value: candidate.to_string(),
                    confidence: NAME_CONFIDENCE,
                });
            }
        }

        fields
    }
}

fn collect(
    out: &mut Vec<ExtractedField>,
    text: &str,
    re: &Regex,
    field_type: FieldType,
    confidence: f32,
) {
    for m in re.find_iter(text) {
        out.push(ExtractedField {
            field_type: field_type.clone(),
            value: m.as_str().trim().to_string(),
            confidence,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values_of(fields: &[ExtractedField], ft: &FieldType) -> Vec<String> {
        fields
            .iter()
            .filter(|f| &f.field_type == ft)
            .map(|f| f.value.clone())
            .collect()
    }

    #[test]
    fn extracts_formatted_and_bare_cpf() {
        let fields = FieldExtractor::new()
            .extract("CPF do contratante: 529.982.247-25 ou 52998224725.");
        let cpfs = values_of(&fields, &FieldType::Cpf);
        assert_eq!(cpfs, vec!["529.982.247-25", "52998224725"]);
    }

    #[test]
    fn extracts_cnpj_with_confidence() {
        let fields = FieldExtractor::new().extract("CNPJ: 11.222.333/0001-81");
        let f = fields
            .iter()
            .find(|f| f.field_type == FieldType::Cnpj)
            .unwrap();
        assert_eq!(f.value, "11.222.333/0001-81");
        assert!((f.confidence - 0.80).abs() < f32::EPSILON);
    }

    #[test]
    fn extracts_email_and_phone() {
        let fields =
            FieldExtractor::new().extract("Contato: joao.silva@empresa.com.br, (11) 98765-4321");
        assert_eq!(
            values_of(&fields, &FieldType::Email),
            vec!["joao.silva@empresa.com.br"]
        );
        assert_eq!(
            values_of(&fields, &FieldType::Phone),
            vec!["(11) 98765-4321"]
        );
    }

    #[test]
    fn extracts_currency_with_thousands() {
        let fields = FieldExtractor::new().extract("Valor mensal: R$ 1.234,56 (mil e duzentos)");
        assert_eq!(
            values_of(&fields, &FieldType::CurrencyValue),
            vec!["R$ 1.234,56"]
        );
    }

    #[test]
    fn extracts_dates() {
        let fields = FieldExtractor::new().extract("Vigência de 01/03/2026 a 1/3/2027.");
        assert_eq!(
            values_of(&fields, &FieldType::Date),
            vec!["01/03/2026", "1/3/2027"]
        );
    }

    #[test]
    fn ambiguous_token_reported_under_both_types() {
        // A bare 8-digit run is both a CEP shape (5+3) and a local phone
        // shape (4+4). Both matchers report it.
        let fields = FieldExtractor::new().extract("Endereço: CEP 01310100");
        assert_eq!(values_of(&fields, &FieldType::Cep), vec!["01310100"]);
        assert_eq!(values_of(&fields, &FieldType::Phone), vec!["01310100"]);
    }

    #[test]
    fn name_heuristic_accepts_full_names_only() {
        let text = "Maria Aparecida dos Santos\nJoão\nCONTRATO DE PRESTAÇÃO\n";
        let fields = FieldExtractor::new().extract(text);
        let names = values_of(&fields, &FieldType::Name);
        assert_eq!(names, vec!["Maria Aparecida dos Santos"]);
    }

    #[test]
    fn name_followed_by_prose_on_same_line_is_extracted() {
        let text = "Joaquim Barbosa Medeiros, brasileiro, casado, residente em Recife";
        let fields = FieldExtractor::new().extract(text);
        assert_eq!(
            values_of(&fields, &FieldType::Name),
            vec!["Joaquim Barbosa Medeiros"]
        );
    }

    #[test]
    fn names_on_adjacent_lines_stay_separate() {
        let text = "Maria Aparecida dos Santos\nJosé Carlos Pereira\n";
        let fields = FieldExtractor::new().extract(text);
        let names = values_of(&fields, &FieldType::Name);
        assert_eq!(
            names,
            vec!["Maria Aparecida dos Santos", "José Carlos Pereira"]
        );
        assert!(names.iter().all(|n| !n.contains('\n')));
    }

    #[test]
    fn bare_cpf_digit_run_is_not_a_phone() {
        let fields = FieldExtractor::new().extract("documento 52998224725");
        assert!(values_of(&fields, &FieldType::Phone).is_empty());
    }

    #[test]
    fn name_heuristic_rejects_overlong_lines() {
        let long = format!("Aaaa {}", "Bbbb ".repeat(20).trim_end());
        let fields = FieldExtractor::new().extract(&long);
        assert!(values_of(&fields, &FieldType::Name).is_empty());
    }

    #[test]
    fn empty_text_yields_no_fields() {
        assert!(FieldExtractor::new().extract("").is_empty());
    }

    #[test]
    fn output_order_is_deterministic() {
        let text = "CPF 529.982.247-25, email a@b.com, R$ 49,90";
        let a = FieldExtractor::new().extract(text);
        let b = FieldExtractor::new().extract(text);
        assert_eq!(a, b);
    }
}
