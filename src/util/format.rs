// Numeric Formatting
// Renders 64-bit values in the radices used for display

const BASE64_DIGITS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Zero-padded 64-digit binary
pub fn to_base2(n: u64) -> String {
    format!("{:064b}", n)
}

pub fn to_base10(n: u64) -> String {
    n.to_string()
}

/// Positional radix-64, most significant digit first.
///
/// This is a numeric base conversion, not RFC 4648 byte encoding:
/// `0` renders as `"0"` and `64` as `"BA"`.
pub fn to_base64(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(BASE64_DIGITS[(n % 64) as usize]);
        n /= 64;
    }
    digits.reverse();

    // Every digit comes from the ASCII table above
    digits.into_iter().map(char::from).collect()
}

/// The eight big-endian bytes as 16 lowercase hex digits
pub fn to_byte_hex(n: u64) -> String {
    hex::encode(n.to_be_bytes())
}
