//! Fixed-width text codec.
//!
//! Text is encoded as exactly [`MAX_LEN`] Unicode scalar values, truncated on
//! the right and padded with `0`. Code `0` doubles as the padding sentinel,
//! so literal NUL characters do not survive a round trip.

/// Width of every encoded vector.
pub const MAX_LEN: usize = 50;

/// Largest valid Unicode code point.
pub const MAX_CODE: u32 = 0x10FFFF;

/// A fixed-length sequence of character codes, `0` meaning "no character".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedVector([u32; MAX_LEN]);

impl EncodedVector {
    /// Build a vector from raw codes, truncating past [`MAX_LEN`] and padding
    /// the remainder with `0`. Codes above [`MAX_CODE`] are clamped.
    pub fn from_codes(codes: impl IntoIterator<Item = u32>) -> Self {
        let mut slots = [0u32; MAX_LEN];
        for (slot, code) in slots.iter_mut().zip(codes) {
            *slot = code.min(MAX_CODE);
        }
        Self(slots)
    }

    pub fn codes(&self) -> &[u32; MAX_LEN] {
        &self.0
    }

    /// Length without trailing padding.
    pub fn significant_len(&self) -> usize {
        self.0.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1)
    }
}

/// Encode text into a fixed-width code vector.
pub fn encode(text: &str) -> EncodedVector {
    EncodedVector::from_codes(text.chars().map(u32::from))
}

/// Decode a code vector back into text.
///
/// Every `0` is dropped wherever it occurs, as are codes that are not valid
/// scalar values (surrogates). The result is trimmed.
pub fn decode(vector: &EncodedVector) -> String {
    let text: String = vector
        .codes()
        .iter()
        .filter(|&&code| code != 0)
        .filter_map(|&code| char::from_u32(code))
        .collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_always_max_len() {
        for len in [0, 1, MAX_LEN - 1, MAX_LEN, MAX_LEN + 1, MAX_LEN * 10] {
            let text = "a".repeat(len);
            assert_eq!(encode(&text).codes().len(), MAX_LEN);
        }
    }

    #[test]
    fn test_encode_pads_with_zero() {
        let vector = encode("hi");
        assert_eq!(vector.codes()[0], 'h' as u32);
        assert_eq!(vector.codes()[1], 'i' as u32);
        assert!(vector.codes()[2..].iter().all(|&c| c == 0));
        assert_eq!(vector.significant_len(), 2);
    }

    #[test]
    fn test_encode_truncates_long_text() {
        let text = format!("{}tail", "x".repeat(MAX_LEN));
        let vector = encode(&text);
        assert_eq!(vector.significant_len(), MAX_LEN);
        assert_eq!(decode(&vector), "x".repeat(MAX_LEN));
    }

    #[test]
    fn test_decode_inverts_encode_for_short_text() {
        for text in ["hello", "  padded  ", "привет, мир", "emoji 🦀 ok", ""] {
            assert_eq!(decode(&encode(text)), text.trim());
        }
    }

    #[test]
    fn test_decode_strips_interior_zeros() {
        let vector = EncodedVector::from_codes(['a' as u32, 0, 'b' as u32]);
        assert_eq!(decode(&vector), "ab");
    }

    #[test]
    fn test_decode_drops_surrogate_codes() {
        let vector = EncodedVector::from_codes(['o' as u32, 0xD800, 'k' as u32]);
        assert_eq!(decode(&vector), "ok");
    }

    #[test]
    fn test_from_codes_clamps_out_of_range() {
        let vector = EncodedVector::from_codes([u32::MAX]);
        assert_eq!(vector.codes()[0], MAX_CODE);
    }

    #[test]
    fn test_empty_text_has_no_significant_len() {
        assert_eq!(encode("").significant_len(), 0);
    }
}
