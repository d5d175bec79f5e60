// RSA Decryption Implementation
// Block-wise decryption with Chinese Remainder Theorem (CRT) recombination

use log::debug;

use super::encrypt::BLOCK_HEX_LEN;
use super::keygen::RsaKeyPair;
use crate::error::{CryptoError, Result};
use crate::math::modular::{mul_mod, pow_mod_unchecked, sub_mod};

/// Split a hex ciphertext into its 64-bit blocks
pub(crate) fn parse_blocks(ciphertext: &str) -> Result<Vec<u64>> {
    if ciphertext.len() % BLOCK_HEX_LEN != 0 {
        return Err(CryptoError::MalformedCiphertext(format!(
            "length {} is not a multiple of {}",
            ciphertext.len(),
            BLOCK_HEX_LEN
        )));
    }

    let bytes = hex::decode(ciphertext)
        .map_err(|e| CryptoError::MalformedCiphertext(e.to_string()))?;

    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut block = [0u8; 8];
            block.copy_from_slice(chunk);
            u64::from_be_bytes(block)
        })
        .collect())
}

/// Decrypt ciphertext using the key pair's private half
/// Returns plaintext as bytes
pub fn decrypt_bytes(ciphertext: &str, key: &RsaKeyPair) -> Result<Vec<u8>> {
    let blocks = parse_blocks(ciphertext)?;

    blocks
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let m = key.decrypt_block(c);
            u8::try_from(m).map_err(|_| {
                debug!("block {} decrypted to {}", i, m);
                CryptoError::Decryption(format!(
                    "block {} decrypted to {}, outside the byte range",
                    i, m
                ))
            })
        })
        .collect()
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(ciphertext: &str, key: &RsaKeyPair) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, key)?;
    String::from_utf8(plaintext).map_err(|e| CryptoError::Decryption(format!("invalid UTF-8: {}", e)))
}

impl RsaKeyPair {
    /// Decrypt one block via CRT
    ///
    /// m1 = c^dp mod p, m2 = c^dq mod q, h = qinv (m1 - m2) mod p,
    /// m = m2 + h q. Agrees with c^d mod n for every c.
    pub fn decrypt_block(&self, c: u64) -> u64 {
        let m1 = pow_mod_unchecked(c, self.dp, self.p);
        let m2 = pow_mod_unchecked(c, self.dq, self.q);

        let diff = sub_mod(m1, m2 % self.p, self.p);
        let h = mul_mod(self.qinv, diff, self.p);

        // h < p and m2 < q, so the sum stays below n
        m2 + h * self.q
    }

    /// Decrypt a hex ciphertext produced for this key pair
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        decrypt_to_string(ciphertext, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::modular::mod_pow;
    use crate::rsa::encrypt::encrypt_bytes;

    fn textbook_key() -> RsaKeyPair {
        RsaKeyPair::from_primes(61, 53, 17).unwrap()
    }

    #[test]
    fn test_crt_matches_direct() {
        let key = textbook_key();
        let private = key.private_key();
        for c in 0..key.modulus() {
            assert_eq!(key.decrypt_block(c), mod_pow(c, private.d, private.n).unwrap(), "c = {}", c);
        }
    }

    #[test]
    fn test_crt_matches_direct_larger_key() {
        // Larger prime listed second exercises m2 >= p
        let key = RsaKeyPair::from_primes(65_521, 4_294_967_291, 65_537).unwrap();
        let private = key.private_key();
        for c in [0u64, 1, 2, 255, 65_521, 123_456_789_012, key.modulus() - 1] {
            assert_eq!(key.decrypt_block(c), mod_pow(c, private.d, private.n).unwrap());
        }
    }

    #[test]
    fn test_decrypt_roundtrip() {
        let key = textbook_key();
        let all_bytes: Vec<u8> = (0..=255).collect();
        let ciphertext = encrypt_bytes(&all_bytes, &key.public_key()).unwrap();
        assert_eq!(decrypt_bytes(&ciphertext, &key).unwrap(), all_bytes);
    }

    #[test]
    fn test_decrypt_string() {
        let key = textbook_key();
        let ciphertext = key.encrypt("Test message", &key.public_key()).unwrap();
        assert_eq!(key.decrypt(&ciphertext).unwrap(), "Test message");
        assert_eq!(key.decrypt("").unwrap(), "");
    }

    #[test]
    fn test_decrypt_out_of_range() {
        let key = textbook_key();
        // Encryption of 256 is a valid block that recovers a non-byte value
        let c = mod_pow(256, 17, key.modulus()).unwrap();
        let ciphertext = hex::encode(c.to_be_bytes());
        assert!(matches!(decrypt_bytes(&ciphertext, &key), Err(CryptoError::Decryption(_))));
    }

    #[test]
    fn test_decrypt_malformed() {
        let key = textbook_key();
        assert!(matches!(key.decrypt("0000"), Err(CryptoError::MalformedCiphertext(_))));
        assert!(matches!(
            key.decrypt("zzzzzzzzzzzzzzzz"),
            Err(CryptoError::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn test_decrypt_invalid_utf8() {
        let key = textbook_key();
        let ciphertext = encrypt_bytes(&[0xff, 0xfe], &key.public_key()).unwrap();
        assert_eq!(decrypt_bytes(&ciphertext, &key).unwrap(), vec![0xff, 0xfe]);
        assert!(matches!(key.decrypt(&ciphertext), Err(CryptoError::Decryption(_))));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let alice = textbook_key();
        let bob = RsaKeyPair::from_primes(251, 241, 7).unwrap();
        let ciphertext = encrypt_bytes(b"Test", &alice.public_key()).unwrap();
        assert_ne!(decrypt_bytes(&ciphertext, &bob).ok(), Some(b"Test".to_vec()));
    }
}
