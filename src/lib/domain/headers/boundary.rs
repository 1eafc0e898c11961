//! MIME boundary token generation

use rand::{distributions::Alphanumeric, Rng};

pub(super) const BOUNDARY_LENGTH: usize = 30;

/// Returns a fresh random alphanumeric token of the fixed boundary length.
///
/// Sampled from the process-wide thread-local generator, never reseeded per
/// call, so concurrent callers within the same clock tick still get
/// distinct tokens.
pub(super) fn boundary_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_token_has_fixed_length() {
        assert_eq!(boundary_token().len(), BOUNDARY_LENGTH);
    }

    #[test]
    fn test_boundary_token_is_alphanumeric() {
        assert!(boundary_token().chars().all(|ch| ch.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_boundary_tokens_differ_between_calls() {
        assert_ne!(boundary_token(), boundary_token());
    }
}
