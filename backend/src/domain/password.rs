//! Password hashing primitive.
//!
//! A password is digested with HMAC-SHA-512 keyed by a fresh random value
//! generated per password. That key doubles as the stored salt: verification
//! recomputes the digest under the stored salt and compares in constant time.
//! The scheme has no tunable work factor; it is kept for compatibility with
//! the stored-record layout (hash and salt always written together).

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Length in bytes of the per-password random salt (the HMAC key).
pub const SALT_LEN: usize = 64;

/// Length in bytes of the stored digest (SHA-512 output).
pub const DIGEST_LEN: usize = 64;

/// A password digest together with the salt that produced it.
///
/// ## Invariants
/// - `hash` and `salt` belong together; neither is ever replaced alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    hash: Vec<u8>,
    salt: Vec<u8>,
}

impl PasswordDigest {
    /// Digest `password` under a freshly generated random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = vec![0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = keyed_digest(&salt, password);
        Self { hash, salt }
    }

    /// Reassemble a digest from stored hash and salt bytes.
    pub fn from_parts(hash: Vec<u8>, salt: Vec<u8>) -> Self {
        Self { hash, salt }
    }

    /// Check `password` against this digest in constant time.
    pub fn verify(&self, password: &str) -> bool {
        let mut mac = new_mac(&self.salt);
        mac.update(password.as_bytes());
        mac.verify_slice(&self.hash).is_ok()
    }

    /// Stored digest bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Stored salt bytes (the HMAC key).
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }
}

fn new_mac(salt: &[u8]) -> HmacSha512 {
    // HMAC accepts keys of any length, so construction cannot fail.
    HmacSha512::new_from_slice(salt).expect("HMAC accepts keys of any length")
}

fn keyed_digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut mac = new_mac(salt);
    mac.update(password.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
