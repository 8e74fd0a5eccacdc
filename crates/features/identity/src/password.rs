//! Salted SHA-256 password digests, hex-encoded.

use ihub_kernel::safe_nanoid;
use sha2::{Digest, Sha256};

pub(crate) fn new_salt() -> String {
    safe_nanoid!(16)
}

pub(crate) fn digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub(crate) fn verify(password: &str, salt: &str, expected: &str) -> bool {
    digest(password, salt) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_depends_on_salt() {
        let a = digest("secret-password", "salt-a");
        let b = digest("secret-password", "salt-b");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn verify_round_trip() {
        let salt = new_salt();
        let stored = digest("secret-password", &salt);
        assert!(verify("secret-password", &salt, &stored));
        assert!(!verify("wrong-password", &salt, &stored));
    }
}
