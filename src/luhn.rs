// 🔢 Luhn Checksum - mod-10 validation of card numbers
//
// Pure and stateless: every malformed input maps to `false`, nothing panics.

/// Shortest card number accepted (after trimming)
pub const MIN_LENGTH: usize = 13;

/// Longest card number accepted (after trimming)
pub const MAX_LENGTH: usize = 19;

/// Check a possibly-absent card number against the Luhn algorithm.
///
/// Leading and trailing characters up to U+0020 (spaces and ASCII control
/// characters) are trimmed first. Anything outside 13..=19 characters, or
/// containing a non-digit, is invalid regardless of its checksum.
pub fn is_valid_card_number(value: Option<&str>) -> bool {
    match value {
        Some(v) => check(v),
        None => false,
    }
}

/// Same as [`is_valid_card_number`] for callers that always have a value.
pub fn check(value: &str) -> bool {
    let sanitized = value.trim_matches(|c: char| c <= ' ');
    let len = sanitized.chars().count();
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
        return false;
    }

    let mut sum = 0u32;
    let mut should_double = false;

    for c in sanitized.chars().rev() {
        if !c.is_ascii_digit() {
            return false;
        }
        let mut digit = c as u32 - '0' as u32;
        if should_double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        should_double = !should_double;
    }

    sum % 10 == 0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_valid_numbers() {
        assert!(check("4111111111111111"));
        assert!(check("5555555555554444"));
        assert!(check("378282246310005")); // 15-digit Amex test number
    }

    #[test]
    fn test_known_invalid_number() {
        assert!(!check("1234567812345678"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(!check("111122223333444")); // 15 digits, bad checksum
        assert!(!check("41111111111111112222")); // 20 digits
        assert!(!check("000000000000")); // 12 zeros would sum to 0
        assert!(check("0000000000000")); // 13 zeros
        assert!(check("0000000000000000000")); // 19 zeros
        assert!(!check("00000000000000000000")); // 20 zeros
    }

    #[test]
    fn test_absent_value() {
        assert!(!is_valid_card_number(None));
        assert!(is_valid_card_number(Some("4111111111111111")));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert!(check("  4111111111111111\t"));
        assert!(!check("4111 1111 1111 1111"));
    }

    #[test]
    fn test_trim_covers_control_chars_only() {
        // Control characters are stripped like spaces
        assert!(check("\u{1}4111111111111111\u{1f}"));
        assert!(check("\r\n4111111111111111\0"));
        // Non-ASCII whitespace is kept, so it fails the digit rule
        assert!(!check("\u{A0}4111111111111111"));
        assert!(!check("4111111111111111\u{2003}"));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits are numeric but not ASCII
        assert!(!check("٤١١١١١١١١١١١١١١١"));
        assert!(!check("411111111111111a"));
        assert!(!check("-4111111111111111"));
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(!check(""));
        assert!(!check("                    "));
    }

    proptest! {
        #[test]
        fn prop_short_digit_strings_invalid(s in "[0-9]{0,12}") {
            prop_assert!(!check(&s));
        }

        #[test]
        fn prop_long_digit_strings_invalid(s in "[0-9]{20,40}") {
            prop_assert!(!check(&s));
        }

        #[test]
        fn prop_any_non_digit_invalid(
            prefix in "[0-9]{6,9}",
            bad in "[a-zA-Z./_-]",
            suffix in "[0-9]{6,9}",
        ) {
            let candidate = format!("{}{}{}", prefix, bad, suffix);
            prop_assert!(!check(&candidate));
        }

        #[test]
        fn prop_check_digit_is_unique(body in "[0-9]{12,18}") {
            // Exactly one trailing digit completes a valid number
            let valid = (0..10)
                .filter(|d| check(&format!("{}{}", body, d)))
                .count();
            prop_assert_eq!(valid, 1);
        }
    }
}
