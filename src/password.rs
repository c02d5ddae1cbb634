use bcrypt::BcryptError;

const COST: u32 = 10;

pub fn hash(plaintext: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, COST)
}

/// Returns false for a wrong password and for a malformed digest alike.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let digest = hash("password").unwrap();
        assert_ne!(digest, "password");
        assert!(verify("password", &digest));
        assert!(!verify("wrongpassword", &digest));
    }

    #[test]
    fn salt_varies_between_hashes() {
        let a = hash("password").unwrap();
        let b = hash("password").unwrap();
        assert_ne!(a, b);
        assert!(verify("password", &a));
        assert!(verify("password", &b));
    }

    #[test]
    fn malformed_digest_is_false_not_error() {
        assert!(!verify("password", "not-a-bcrypt-digest"));
        assert!(!verify("password", ""));
    }
}
