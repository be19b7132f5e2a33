//! Official check-digit algorithms for Brazilian CPF and CNPJ numbers.
//!
//! Both are mod-11 schemes over the leading digits; numbers made of a
//! single repeated digit pass the arithmetic but are rejected as
//! invalid, matching the official validators.

/// Strip everything but ASCII digits.
pub fn clean_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate an 11-digit CPF (personal taxpayer id). Accepts raw or
/// formatted input (`xxx.xxx.xxx-xx`).
pub fn cpf_is_valid(value: &str) -> bool {
    let digits = to_digit_vec(&clean_digits(value));
    let Some(digits) = digits else { return false };

    if digits.len() != 11 || all_same(&digits) {
        return false;
    }

    let dv1 = cpf_check_digit(&digits[..9]);
    let dv2 = cpf_check_digit(&digits[..10]);
    digits[9] == dv1 && digits[10] == dv2
}

/// Validate a 14-digit CNPJ (company taxpayer id). Accepts raw or
/// formatted input (`xx.xxx.xxx/xxxx-xx`).
pub fn cnpj_is_valid(value: &str) -> bool {
    let digits = to_digit_vec(&clean_digits(value));
    let Some(digits) = digits else { return false };

    if digits.len() != 14 || all_same(&digits) {
        return false;
    }

    const WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let dv1 = cnpj_check_digit(&digits[..12], &WEIGHTS_1);
    let dv2 = cnpj_check_digit(&digits[..13], &WEIGHTS_2);
    digits[12] == dv1 && digits[13] == dv2
}

fn to_digit_vec(cleaned: &str) -> Option<Vec<u32>> {
    if cleaned.is_empty() {
        return None;
    }
    cleaned.chars().map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// CPF check digit over the given prefix: weights descend from
/// `len + 1` down to 2, then `dv = (sum * 10 % 11) % 10`.
fn cpf_check_digit(prefix: &[u32]) -> u32 {
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (prefix.len() as u32 + 1 - i as u32))
        .sum();
    (sum * 10 % 11) % 10
}

/// CNPJ check digit: weighted sum, `dv = 11 - sum % 11`, collapsing
/// 10/11 to 0.
fn cnpj_check_digit(prefix: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = prefix.iter().zip(weights).map(|(d, w)| d * w).sum();
    let dv = 11 - sum % 11;
    if dv >= 10 {
        0
    } else {
        dv
    }
}
