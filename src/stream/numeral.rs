//! Numeral spans.
//!
//! Bhāṣā layer: SAṄKHYĀ_START + ULEB128 digit count + one pada-wrapped
//! digit-word per digit, units first (aṅkānāṃ vāmato gatiḥ). Lipi layer: NUM
//! + digit glyphs in visual order, implicitly terminated by the first byte
//! ≥ 0x10.

use crate::bytes::{NUM, PADA_END, PADA_START, SANKHYA_START};
use crate::container::write_uleb128;

/// The closed digit-word vocabulary: the bhāṣā bytes of each digit's pure
/// prātipadika. Membership is checked by exact byte equality.
pub const DIGIT_WORDS: [&[u8]; 10] = [
    &[0x29, 0x88, 0x1C, 0x31, 0x40],       // śūnya
    &[0x85, 0x00, 0x40],                   // eka
    &[0x1A, 0x32, 0x44],                   // dvi
    &[0x18, 0x33, 0x44],                   // tri
    &[0x08, 0x40, 0x18, 0x48, 0x33],       // catur
    &[0x20, 0x40, 0x0C, 0x08, 0x40],       // pañca
    &[0x2A, 0x40, 0x2A],                   // ṣaṣ
    &[0x2B, 0x40, 0x20, 0x18, 0x40],       // sapta
    &[0x40, 0x2A, 0x10, 0x40],             // aṣṭa
    &[0x1C, 0x40, 0x32, 0x40],             // nava
];

/// IAST names of the digit-words, for inspection output.
pub const DIGIT_IAST: [&str; 10] = [
    "śūnya", "eka", "dvi", "tri", "catur", "pañca", "ṣaṣ", "sapta", "aṣṭa", "nava",
];

/// Write a SAṄKHYĀ span for digits given in visual L→R order.
pub fn write_sankhya(out: &mut Vec<u8>, digits: &[u8]) {
    out.push(SANKHYA_START);
    write_uleb128(out, digits.len() as u32);
    for &d in digits.iter().rev() {
        out.push(PADA_START);
        out.extend_from_slice(DIGIT_WORDS[d as usize]);
        out.push(PADA_END);
    }
}

/// Write a NUM span for digits in visual L→R order.
///
/// Termination is implicit: whatever follows must be ≥ 0x10.
pub fn write_num(out: &mut Vec<u8>, digits: &[u8]) {
    out.push(NUM);
    out.extend_from_slice(digits);
}

/// Look up a digit-pada's bytes against the closed vocabulary.
pub fn lookup_digit_word(pada: &[u8]) -> Option<u8> {
    DIGIT_WORDS
        .iter()
        .position(|&word| word == pada)
        .map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sankhya_108_layout() {
        let mut out = Vec::new();
        write_sankhya(&mut out, &[1, 0, 8]);
        assert_eq!(out[0], SANKHYA_START);
        assert_eq!(out[1], 0x03); // count
        // units first: aṣṭa, then śūnya, then eka
        assert_eq!(out[2], PADA_START);
        assert_eq!(&out[3..7], DIGIT_WORDS[8]);
        assert_eq!(out[7], PADA_END);
    }

    #[test]
    fn test_digit_words_are_distinct() {
        for (i, a) in DIGIT_WORDS.iter().enumerate() {
            for (j, b) in DIGIT_WORDS.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_lookup_rejects_near_misses() {
        assert_eq!(lookup_digit_word(DIGIT_WORDS[4]), Some(4));
        // truncated catur is not a digit word
        assert_eq!(lookup_digit_word(&DIGIT_WORDS[4][..4]), None);
        assert_eq!(lookup_digit_word(&[]), None);
    }
}
