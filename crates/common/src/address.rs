//! Starknet address helpers.
//!
//! Felts are printed with and without zero padding depending on the source, so
//! every comparison goes through [`canonical_address`].

/// Lowercase, `0x`-prefixed, leading zeros stripped. `0x0` stays `0x0`.
pub fn canonical_address(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    let digits = lower.strip_prefix("0x").unwrap_or(&lower);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{digits}")
    }
}

/// `0x` followed by 1..=64 hex digits.
pub fn is_valid_address(raw: &str) -> bool {
    let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) else {
        return false;
    };
    !digits.is_empty() && digits.len() <= 64 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_strips_padding_and_case() {
        assert_eq!(
            canonical_address("0x01176A1bd8"),
            canonical_address("0x1176a1BD8")
        );
        assert_eq!(canonical_address("0x01176A1bd8"), "0x1176a1bd8");
    }

    #[test]
    fn test_canonical_zero() {
        assert_eq!(canonical_address("0x0000"), "0x0");
    }

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address("0x04270219d365d6b0"));
        assert!(!is_valid_address("04270219d365d6b0"));
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address("0xzz"));
        assert!(!is_valid_address(&format!("0x{}", "1".repeat(65))));
    }
}
