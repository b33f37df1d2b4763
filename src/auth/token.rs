use rand::{rngs::OsRng, RngCore};

/// Length of the issued token in hex characters.
pub const TOKEN_LEN: usize = 40;

/// Generate an opaque token: random bytes from the OS, hex-encoded.
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_LEN / 2];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_is_fixed_length_hex() {
        let token = generate();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn generated_token_decodes_back_to_bytes() {
        let token = generate();
        let bytes = hex::decode(&token).expect("token should be valid hex");
        assert_eq!(bytes.len(), TOKEN_LEN / 2);
    }
}
