use distriplast::core::document::{normalize_cnpj, validate_cnpj};

#[test]
fn test_accepts_formatted_and_bare_input() {
    assert!(validate_cnpj("11.222.333/0001-81").is_ok());
    assert!(validate_cnpj("11222333000181").is_ok());
}

#[test]
fn test_rejects_wrong_length() {
    assert!(validate_cnpj("").is_err());
    assert!(validate_cnpj("123").is_err());
    assert!(validate_cnpj("1122233300018").is_err());
    assert!(validate_cnpj("112223330001811").is_err());
}

#[test]
fn test_rejects_repeated_digits() {
    for digit in 0..=9 {
        let cnpj: String = std::iter::repeat(char::from(b'0' + digit)).take(14).collect();
        assert!(validate_cnpj(&cnpj).is_err(), "accepted {}", cnpj);
    }
}

#[test]
fn test_rejects_bad_check_digits() {
    // First check digit off by one
    assert!(validate_cnpj("11.222.333/0001-91").is_err());
    // Second check digit off by one
    assert!(validate_cnpj("11.222.333/0001-82").is_err());
}

#[test]
fn test_rejects_non_digit_noise_that_changes_length() {
    assert!(validate_cnpj("11.222.333/0001-8").is_err());
}

#[test]
fn test_normalize_strips_punctuation() {
    assert_eq!(
        normalize_cnpj("11.222.333/0001-81").unwrap(),
        "11222333000181"
    );
}

#[test]
fn test_normalize_rejects_invalid_input() {
    assert!(normalize_cnpj("11.222.333/0001-82").is_err());
}
