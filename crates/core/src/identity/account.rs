//! Account-number generation.

use rand::Rng;

/// Generates a fresh 10-digit NUBAN-style account number.
///
/// Numbers are drawn uniformly from `[2_000_000_000, 10_000_000_000)`, so
/// every value is exactly ten digits and starts with 2-9. Uniqueness is
/// enforced by the storage layer's unique index, not here.
#[must_use]
pub fn generate_account_number() -> String {
    let n: u64 = rand::rng().random_range(0..8_000_000_000) + 2_000_000_000;
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_numbers_are_ten_digits() {
        for _ in 0..100 {
            let number = generate_account_number();
            assert_eq!(number.len(), 10, "got {number}");
            assert!(number.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(number.chars().next(), Some('0'));
            assert_ne!(number.chars().next(), Some('1'));
        }
    }
}
