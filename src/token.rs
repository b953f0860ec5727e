//! Ownership token generation.
//!
//! A token is an opaque string proving which caller currently holds a lock;
//! releasing a lock requires presenting the exact token that acquired it.
//! Tokens are uniformly random over a 64-symbol alphabet, so each symbol
//! carries 6 bits of entropy.

use rand::Rng;

/// The 64 symbols a token is drawn from: digits, uppercase, lowercase,
/// `/` and `-`.
pub const TOKEN_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz/-";

/// Token length used when the configuration does not supply a valid one.
pub const DEFAULT_AUTH_TOKEN_SIZE: usize = 20;

/// Generate a fresh ownership token of exactly `size` symbols.
///
/// Uses the thread-local generator from `rand`, which is cryptographically
/// secure, so tokens are not guessable from earlier ones.
pub fn random_token(size: usize) -> String {
    let mut rng = rand::rng();

    (0..size)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
