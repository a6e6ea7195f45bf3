//! Security helpers (constant-time compare)

use subtle::ConstantTimeEq;

/// Constant-time equality for signature hashes.
pub fn ct_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_eq() {
        assert!(ct_eq("abc=", "abc="));
        assert!(!ct_eq("abc=", "abd="));
        assert!(!ct_eq("abc", "abc="));
    }
}
