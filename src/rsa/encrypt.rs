// RSA Encryption Implementation
// Textbook RSA applied to each plaintext byte independently

use super::keygen::{RsaKeyPair, RsaPublicKey};
use crate::error::{CryptoError, Result};
use crate::math::modular::mod_pow;

/// Hex digits per ciphertext block
pub const BLOCK_HEX_LEN: usize = 16;

/// Render one 64-bit value as a fixed-width hex block
pub(crate) fn encode_block(value: u64) -> String {
    hex::encode(value.to_be_bytes())
}

/// Encrypt bytes using RSA public key
/// Each byte b becomes b^e mod n as one 16-digit hex block
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<String> {
    let mut ciphertext = String::with_capacity(plaintext.len() * BLOCK_HEX_LEN);
    for &byte in plaintext {
        if byte as u64 >= public_key.n {
            return Err(CryptoError::Domain(format!(
                "byte {} does not fit modulus {}",
                byte, public_key.n
            )));
        }
        let c = mod_pow(byte as u64, public_key.e, public_key.n)?;
        ciphertext.push_str(&encode_block(c));
    }
    Ok(ciphertext)
}

/// Encrypt a string using RSA public key
pub fn encrypt_string(plaintext: &str, public_key: &RsaPublicKey) -> Result<String> {
    encrypt_bytes(plaintext.as_bytes(), public_key)
}

impl RsaPublicKey {
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        encrypt_bytes(plaintext, self)
    }
}

impl RsaKeyPair {
    /// Encrypt `message` for the holder of `public_key`
    pub fn encrypt(&self, message: &str, public_key: &RsaPublicKey) -> Result<String> {
        encrypt_string(message, public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_bytes() {
        let key = RsaKeyPair::from_primes(61, 53, 17).unwrap();
        let ciphertext = encrypt_bytes(b"A", &key.public_key()).unwrap();
        // 65^17 mod 3233 = 2790
        assert_eq!(ciphertext, "0000000000000ae6");
    }

    #[test]
    fn test_block_per_byte() {
        let key = RsaKeyPair::from_primes(61, 53, 17).unwrap();
        let message = "Hello, RSA!";

        let ciphertext = key.encrypt(message, &key.public_key()).unwrap();
        assert_eq!(ciphertext.len(), message.len() * BLOCK_HEX_LEN);

        // Deterministic and unpadded: equal bytes give equal blocks
        let blocks: Vec<&str> = (0..message.len())
            .map(|i| &ciphertext[i * BLOCK_HEX_LEN..(i + 1) * BLOCK_HEX_LEN])
            .collect();
        assert_eq!(blocks[2], blocks[3]); // "ll"
        assert_ne!(blocks[0], blocks[1]);
    }

    #[test]
    fn test_encrypt_empty() {
        let key = RsaKeyPair::from_primes(61, 53, 17).unwrap();
        assert_eq!(key.public_key().encrypt(b"").unwrap(), "");
    }

    #[test]
    fn test_encrypt_small_modulus() {
        // Bytes at or above n would be reduced and decrypt to something else
        let key = RsaPublicKey { e: 5, n: 35 };
        assert!(matches!(encrypt_bytes(b"hi", &key), Err(CryptoError::Domain(_))));
        assert_eq!(encrypt_bytes(&[0, 34], &key).unwrap().len(), 32);
    }

    #[test]
    fn test_encrypt_zero_modulus() {
        let key = RsaPublicKey { e: 3, n: 0 };
        assert!(matches!(encrypt_string("x", &key), Err(CryptoError::Domain(_))));
    }
}
