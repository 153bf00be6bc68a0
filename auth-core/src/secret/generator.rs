use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::Rng;
use rand::RngCore;

use super::errors::SecretError;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Character classes available for printable secret generation.
///
/// Each class can be toggled independently; disabling all of them is an
/// error at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            lowercase: true,
            uppercase: true,
            digits: true,
        }
    }
}

impl Alphabet {
    fn charset(&self) -> Vec<char> {
        let mut chars = String::new();
        if self.lowercase {
            chars.push_str(LOWERCASE);
        }
        if self.uppercase {
            chars.push_str(UPPERCASE);
        }
        if self.digits {
            chars.push_str(DIGITS);
        }
        chars.chars().collect()
    }
}

/// Cryptographically secure random secret generation.
///
/// Used for password-reset tokens (printable form) and for fallback signing
/// secrets (raw bytes, base64-encoded). All randomness comes from the OS
/// CSPRNG.
pub struct SecretGenerator;

impl SecretGenerator {
    /// Create a new secret generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a printable secret from the full default alphabet
    /// (lowercase, uppercase, and digits).
    ///
    /// # Arguments
    /// * `length` - Number of characters to generate
    ///
    /// # Returns
    /// Random string of `length` characters
    pub fn generate(&self, length: usize) -> Result<String, SecretError> {
        self.generate_with(length, Alphabet::default())
    }

    /// Generate a printable secret from selected character classes.
    ///
    /// # Arguments
    /// * `length` - Number of characters to generate
    /// * `alphabet` - Character classes to draw from
    ///
    /// # Returns
    /// Random string of `length` characters
    ///
    /// # Errors
    /// * `EmptyAlphabet` - Every character class is disabled
    pub fn generate_with(&self, length: usize, alphabet: Alphabet) -> Result<String, SecretError> {
        let charset = alphabet.charset();
        if charset.is_empty() {
            return Err(SecretError::EmptyAlphabet);
        }

        let mut rng = OsRng;
        Ok((0..length)
            .map(|_| charset[rng.gen_range(0..charset.len())])
            .collect())
    }

    /// Generate `count` raw random bytes, base64-encoded.
    ///
    /// Higher-entropy variant for secrets that never need to be typed by a
    /// human, such as fallback signing keys.
    ///
    /// # Arguments
    /// * `count` - Number of random bytes before encoding
    ///
    /// # Returns
    /// Base64 (standard alphabet, padded) encoding of the bytes
    pub fn generate_bytes(&self, count: usize) -> String {
        let mut buf = vec![0u8; count];
        OsRng.fill_bytes(&mut buf);
        STANDARD.encode(buf)
    }
}

impl Default for SecretGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length() {
        let generator = SecretGenerator::new();

        let secret = generator.generate(32).expect("Failed to generate secret");
        assert_eq!(secret.chars().count(), 32);

        let empty = generator.generate(0).expect("Failed to generate secret");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_generate_uses_default_alphabet() {
        let generator = SecretGenerator::new();
        let secret = generator.generate(256).unwrap();

        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_with_digits_only() {
        let generator = SecretGenerator::new();
        let alphabet = Alphabet {
            lowercase: false,
            uppercase: false,
            digits: true,
        };

        let secret = generator.generate_with(64, alphabet).unwrap();
        assert!(secret.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_with_empty_alphabet() {
        let generator = SecretGenerator::new();
        let alphabet = Alphabet {
            lowercase: false,
            uppercase: false,
            digits: false,
        };

        assert_eq!(
            generator.generate_with(8, alphabet),
            Err(SecretError::EmptyAlphabet)
        );
    }

    #[test]
    fn test_consecutive_secrets_differ() {
        let generator = SecretGenerator::new();

        let first = generator.generate(32).unwrap();
        let second = generator.generate(32).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_bytes_roundtrip() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let generator = SecretGenerator::new();
        let encoded = generator.generate_bytes(32);

        let decoded = STANDARD.decode(&encoded).expect("Output must be base64");
        assert_eq!(decoded.len(), 32);
    }
}
