//! CSRF `state` token generation for popup flows
//!
//! Tokens are short base-36 strings (`[0-9a-z]`), safe to place in a query
//! string without encoding.
//!
//! # Security
//!
//! A token carries at most 11 base-36 digits (about 56 bits). Nothing
//! guarantees uniqueness across calls, and the token is not bound to the
//! session that issued it. It only mitigates CSRF when the caller compares
//! the value returned on callback with the one it sent.

use rand::Rng;

/// Number of base-36 digits in a generated token
pub const STATE_TOKEN_LEN: usize = 11;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh `state` token
///
/// ```
/// use spa_auth::state_token::{STATE_TOKEN_LEN, generate_state_token};
///
/// let token = generate_state_token();
/// assert_eq!(token.len(), STATE_TOKEN_LEN);
/// assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
/// ```
pub fn generate_state_token() -> String {
    let mut rng = rand::thread_rng();
    (0..STATE_TOKEN_LEN)
        .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `token` only uses the base-36 token alphabet
pub fn is_state_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| BASE36_ALPHABET.contains(&b))
}

/// Generator attached to providers that send a `state` parameter
///
/// Each call to [`StateGenerator::generate`] yields a new token; the
/// generator itself holds no state and can be copied freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateGenerator;

impl StateGenerator {
    pub fn generate(&self) -> String {
        generate_state_token()
    }
}
