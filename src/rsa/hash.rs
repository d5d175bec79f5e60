// Message Digest
// SHA-2 style compression over 1024-bit blocks with a 64-bit length trailer

use std::fmt;

/// Block size in bytes
const BLOCK_LEN: usize = 128;

/// Offset of the big-endian bit-length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

const ROUNDS: usize = 80;

/// Initial hash state
const H_INIT: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

/// Round constants
const K: [u64; ROUNDS] = [
    0x428a2f98d728ae22,
    0x7137449123ef65cd,
    0xb5c0fbcfec4d3b2f,
    0xe9b5dba58189dbbc,
    0x3956c25bf348b538,
    0x59f111f1b605d019,
    0x923f82a4af194f9b,
    0xab1c5ed5da6d8118,
    0xd807aa98a3030242,
    0x12835b0145706fbe,
    0x243185be4ee4b28c,
    0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f,
    0x80deb1fe3b1696b1,
    0x9bdc06a725c71235,
    0xc19bf174cf692694,
    0xe49b69c19ef14ad2,
    0xefbe4786384f25e3,
    0x0fc19dc68b8cd5b5,
    0x240ca1cc77ac9c65,
    0x2de92c6f592b0275,
    0x4a7484aa6ea6e483,
    0x5cb0a9dcbd41fbd4,
    0x76f988da831153b5,
    0x983e5152ee66dfab,
    0xa831c66d2db43210,
    0xb00327c898fb213f,
    0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2,
    0xd5a79147930aa725,
    0x06ca6351e003826f,
    0x142929670a0e6e70,
    0x27b70a8546d22ffc,
    0x2e1b21385c26c926,
    0x4d2c6dfc5ac42aed,
    0x53380d139d95b3df,
    0x650a73548baf63de,
    0x766a0abb3c77b2a8,
    0x81c2c92e47edaee6,
    0x92722c851482353b,
    0xa2bfe8a14cf10364,
    0xa81a664bbc423001,
    0xc24b8b70d0f89791,
    0xc76c51a30654be30,
    0xd192e819d6ef5218,
    0xd69906245565a910,
    0xf40e35855771202a,
    0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8,
    0x1e376c085141ab53,
    0x2748774cdf8eeb99,
    0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63,
    0x4ed8aa4ae3418acb,
    0x5b9cca4f7763e373,
    0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc,
    0x78a5636f43172f60,
    0x84c87814a1f0ab72,
    0x8cc702081a6439ec,
    0x90befffa23631e28,
    0xa4506cebde82bde9,
    0xbef9a3f7b2c67915,
    0xc67178f2e372532b,
    0xca273eceea26619c,
    0xd186b8c721c0c207,
    0xeada7dd6cde0eb1e,
    0xf57d4f7fee6ed178,
    0x06f067aa72176fba,
    0x0a637dc5a2c898a6,
    0x113f9804bef90dae,
    0x1b710b35131c471b,
    0x28db77f523047d84,
    0x32caab7b40c72493,
    0x3c9ebe0a15c9bebc,
    0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6,
    0x597f299cfc657e2a,
    0x5fcb6fab3ad6faec,
    0x6c44198c4a475817,
];

/// Full 512-bit digest state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digest {
    words: [u64; 8],
}

impl Digest {
    pub fn words(&self) -> &[u64; 8] {
        &self.words
    }

    /// Low 16 bits of the first word, the input to RSA signing
    pub fn truncated(&self) -> u64 {
        self.words[0] & 0xffff
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[inline(always)]
fn ch(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u64) -> u64 {
    x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

#[inline(always)]
fn big_sigma1(x: u64) -> u64 {
    x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

#[inline(always)]
fn small_sigma0(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

#[inline(always)]
fn small_sigma1(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

/// Compresses one 128-byte block into `state`
pub fn compress(state: &mut [u64; 8], block: &[u8; BLOCK_LEN]) {
    let mut w = [0u64; ROUNDS];
    for (slot, chunk) in w.iter_mut().zip(block.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *slot = u64::from_be_bytes(bytes);
    }
    for t in 16..ROUNDS {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..ROUNDS {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (word, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(v);
    }
}

/// Hashes an arbitrary byte sequence
///
/// Padding appends `0x80`, zeros up to byte 120 of the last block and the
/// message length in bits as a 64-bit big-endian integer.
pub fn digest(message: &[u8]) -> Digest {
    let mut state = H_INIT;

    let mut blocks = message.chunks_exact(BLOCK_LEN);
    for chunk in &mut blocks {
        let mut block = [0u8; BLOCK_LEN];
        block.copy_from_slice(chunk);
        compress(&mut state, &block);
    }

    let rem = blocks.remainder();
    let mut block = [0u8; BLOCK_LEN];
    block[..rem.len()].copy_from_slice(rem);
    block[rem.len()] = 0x80;

    // No room left for the length field
    if rem.len() >= LENGTH_OFFSET {
        compress(&mut state, &block);
        block = [0u8; BLOCK_LEN];
    }

    let bit_len = (message.len() as u64).wrapping_mul(8);
    block[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
    compress(&mut state, &block);

    Digest { words: state }
}

/// Truncated digest used as the signing input
pub fn hash_message(message: &[u8]) -> u64 {
    digest(message).truncated()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_words() {
        assert_eq!(digest(b"").words()[0], 0xcf83e1357eefb8bd);
        assert_eq!(digest(b"abc").words()[0], 0xddaf35a193617aba);
        assert_eq!(digest(b"Hello, RSA!").words()[0], 0xdcb96d46013716e4);
    }

    #[test]
    fn test_truncation() {
        assert_eq!(hash_message(b""), 47293);
        assert_eq!(hash_message(b"abc"), 31418);
        assert_eq!(hash_message(b"hello world"), 55019);
        assert!(hash_message(b"anything at all") <= 0xffff);
    }

    #[test]
    fn test_abc_full() {
        assert_eq!(
            digest(b"abc").to_hex(),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_length_field_boundary() {
        // 112..120 trailing bytes still fit the 64-bit length in one block
        assert_eq!(digest(&[b'x'; 115]).words()[0], 0xa5acfecf568d9f15);
        assert_ne!(digest(&[b'x'; 119]), digest(&[b'x'; 120]));
        assert_ne!(digest(&[b'x'; 127]), digest(&[b'x'; 128]));
    }

    #[test]
    fn test_display() {
        let d = digest(b"abc");
        assert_eq!(d.to_string(), d.to_hex());
        assert_eq!(d.to_hex().len(), 128);
    }
}
