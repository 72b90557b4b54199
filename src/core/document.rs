use crate::core::{AppError, Result};

/// Validates a CNPJ (Brazilian company tax id).
///
/// Accepts formatted input ("12.345.678/0001-95") or bare digits. The value
/// must contain exactly 14 digits after stripping punctuation, must not be a
/// single repeated digit, and both mod-11 check digits must match.
pub fn validate_cnpj(input: &str) -> Result<()> {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 14 {
        return Err(AppError::validation(format!(
            "CNPJ must contain exactly 14 digits, got {}",
            digits.len()
        )));
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(AppError::validation("CNPJ cannot be a repeated digit"));
    }

    let first = check_digit(&digits[..12], &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    if first != digits[12] {
        return Err(AppError::validation("Invalid CNPJ check digits"));
    }

    let second = check_digit(&digits[..13], &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    if second != digits[13] {
        return Err(AppError::validation("Invalid CNPJ check digits"));
    }

    Ok(())
}

/// Strips punctuation, returning the 14 bare digits of a valid CNPJ.
pub fn normalize_cnpj(input: &str) -> Result<String> {
    validate_cnpj(input)?;
    Ok(input.chars().filter(|c| c.is_ascii_digit()).collect())
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        rem => 11 - rem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cnpj() {
        assert!(validate_cnpj("11.222.333/0001-81").is_ok());
        assert!(validate_cnpj("11222333000181").is_ok());
    }

    #[test]
    fn test_wrong_length() {
        assert!(validate_cnpj("1122233300018").is_err());
        assert!(validate_cnpj("").is_err());
    }

    #[test]
    fn test_repeated_digits() {
        assert!(validate_cnpj("11111111111111").is_err());
        assert!(validate_cnpj("00000000000000").is_err());
    }

    #[test]
    fn test_bad_check_digit() {
        assert!(validate_cnpj("11222333000182").is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize_cnpj("11.222.333/0001-81").unwrap(),
            "11222333000181"
        );
    }
}
