//! Credential checking and random token/nonce generation.
//!
//! Passwords are kept as salted SHA-256 digests derived at process
//! start; plaintext never sits in a long-lived table. All secret
//! comparisons go through [`constant_time_eq`]. Tokens and nonces carry
//! 128 bits from the operating system's CSPRNG.

use once_cell::sync::Lazy;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 16;
const TOKEN_BYTES: usize = 16; // 128 bits

struct Credential {
    salt: [u8; SALT_BYTES],
    digest: [u8; 32],
}

impl Credential {
    fn derive(password: &str) -> Self {
        let mut salt = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut salt);
        let digest = salted_digest(&salt, password);
        Self { salt, digest }
    }
}

/// The fixed credential table. Read-only for the process lifetime.
static CREDENTIALS: Lazy<Vec<(String, Credential)>> = Lazy::new(|| {
    [("crashoverride", "0cool"), ("cerealkiller", "emmanuel")]
        .into_iter()
        .map(|(user, pass)| (user.to_string(), Credential::derive(pass)))
        .collect()
});

fn salted_digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Byte-wise comparison that never short-circuits on the first
/// differing byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Checks a credential pair against the table.
///
/// A username miss still computes a digest against a dummy credential
/// so the amount of hashing does not depend on table membership.
pub fn check_login(username: &str, password: &str) -> bool {
    static DUMMY: Lazy<Credential> = Lazy::new(|| Credential::derive(""));

    let known = CREDENTIALS
        .iter()
        .find(|(u, _)| u == username)
        .map(|(_, c)| c);
    let target = known.unwrap_or(&DUMMY);

    let candidate = salted_digest(&target.salt, password);
    constant_time_eq(&candidate, &target.digest) && known.is_some()
}

fn random_hex(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// A fresh opaque session token.
pub fn new_token() -> String {
    random_hex(TOKEN_BYTES)
}

/// A fresh CSRF nonce.
pub fn new_nonce() -> String {
    random_hex(TOKEN_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_check_out() {
        assert!(check_login("crashoverride", "0cool"));
        assert!(check_login("cerealkiller", "emmanuel"));
    }

    #[test]
    fn wrong_password_and_unknown_user_fail() {
        assert!(!check_login("crashoverride", "00cool"));
        assert!(!check_login("crashoverride", ""));
        assert!(!check_login("zerocool", "0cool"));
        // The dummy credential must not be loggable into.
        assert!(!check_login("nobody", ""));
    }

    #[test]
    fn tokens_are_128_bit_hex_and_distinct() {
        let a = new_token();
        let b = new_token();
        assert_eq!(a.len(), 32);
        assert!(a.bytes().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn constant_time_eq_basics() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }
}
