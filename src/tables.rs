//! Phoneme tables: IAST token ⇄ byte maps and Devanāgarī emission tables.
//!
//! The svara map covers the 14 canonical vowels; accent is carried in the A
//! field and applied/stripped around the base lookup. The vyañjana map covers
//! the 25 varga consonants plus 12 non-varga entries. Decoding of svara bytes
//! is analytic over (series, grade, quantity), so grade bytes produced by the
//! algebra kernel (e.g. vṛddhi of `a`) still render.

use crate::bytes::{accent, grade, quantity, series};

/// Canonical vowel tokens and their neutral-accent bytes.
///
/// Ordered longest-first so the tokenizer can scan greedily.
pub const SVARA_TOKENS: [(&str, u8); 14] = [
    ("ai", 0x86),
    ("au", 0x8A),
    ("a", 0x40),
    ("ā", 0x80),
    ("i", 0x44),
    ("ī", 0x84),
    ("u", 0x48),
    ("ū", 0x88),
    ("ṛ", 0x4C),
    ("ṝ", 0x8C),
    ("ḷ", 0x4F),
    ("ḹ", 0x8F),
    ("e", 0x85),
    ("o", 0x89),
];

/// Consonant tokens and their bytes, longest-first.
pub const VYANJANA_TOKENS: [(&str, u8); 38] = [
    // candrabindu digraph (m + U+0310) must win over plain m
    ("m\u{0310}", crate::bytes::ANU),
    ("kh", 0x01),
    ("gh", 0x03),
    ("ch", 0x09),
    ("jh", 0x0B),
    ("ṭh", 0x11),
    ("ḍh", 0x13),
    ("th", 0x19),
    ("dh", 0x1B),
    ("ph", 0x21),
    ("bh", 0x23),
    ("k", 0x00),
    ("g", 0x02),
    ("ṅ", 0x04),
    ("c", 0x08),
    ("j", 0x0A),
    ("ñ", 0x0C),
    ("ṭ", 0x10),
    ("ḍ", 0x12),
    ("ṇ", 0x14),
    ("t", 0x18),
    ("d", 0x1A),
    ("n", 0x1C),
    ("p", 0x20),
    ("b", 0x22),
    ("m", 0x24),
    ("ś", 0x29),
    ("ṣ", 0x2A),
    ("s", 0x2B),
    ("y", 0x31),
    ("v", 0x32),
    ("r", 0x33),
    ("l", 0x34),
    ("h", 0x38),
    ("ḥ", 0x39),
    ("ṃ", 0x3A),
    ("ẖ", 0x3B),
    ("ḫ", 0x3C),
];

/// IAST for a vyañjana byte, if assigned.
pub fn vyanjana_iast(b: u8) -> Option<&'static str> {
    let s = match b {
        0x00 => "k",
        0x01 => "kh",
        0x02 => "g",
        0x03 => "gh",
        0x04 => "ṅ",
        0x08 => "c",
        0x09 => "ch",
        0x0A => "j",
        0x0B => "jh",
        0x0C => "ñ",
        0x10 => "ṭ",
        0x11 => "ṭh",
        0x12 => "ḍ",
        0x13 => "ḍh",
        0x14 => "ṇ",
        0x18 => "t",
        0x19 => "th",
        0x1A => "d",
        0x1B => "dh",
        0x1C => "n",
        0x20 => "p",
        0x21 => "ph",
        0x22 => "b",
        0x23 => "bh",
        0x24 => "m",
        0x29 => "ś",
        0x2A => "ṣ",
        0x2B => "s",
        0x31 => "y",
        0x32 => "v",
        0x33 => "r",
        0x34 => "l",
        0x38 => "h",
        0x39 => "ḥ",
        0x3A => "ṃ",
        0x3B => "ẖ",
        0x3C => "ḫ",
        _ => return None,
    };
    Some(s)
}

/// Base IAST (accent ignored) for a svara byte, analytic over the fields.
///
/// Grade bytes outside the canonical 14 render where the varṇa system has a
/// single-phoneme value: guṇa/vṛddhi of the a-series collapse to a/ā, special
/// grade is defined only in the Ṛ-series (ḷ/ḹ). Guṇa/vṛddhi of the Ṛ-series
/// (ar/ār) are not single phonemes and have no byte rendering.
pub fn svara_base_iast(b: u8) -> Option<&'static str> {
    let long = quantity(b) != 0b01;
    let base = match (series(b), grade(b)) {
        (0b00, 0b00) | (0b00, 0b01) | (0b00, 0b10) => {
            if long {
                "ā"
            } else {
                "a"
            }
        }
        (0b01, 0b00) => {
            if long {
                "ī"
            } else {
                "i"
            }
        }
        (0b01, 0b01) => "e",
        (0b01, 0b10) => "ai",
        (0b10, 0b00) => {
            if long {
                "ū"
            } else {
                "u"
            }
        }
        (0b10, 0b01) => "o",
        (0b10, 0b10) => "au",
        (0b11, 0b00) => {
            if long {
                "ṝ"
            } else {
                "ṛ"
            }
        }
        (0b11, 0b11) => {
            if long {
                "ḹ"
            } else {
                "ḷ"
            }
        }
        _ => return None,
    };
    Some(base)
}

/// Full IAST for a svara byte, with accent mark applied and pluta notation.
pub fn svara_iast(b: u8) -> Option<String> {
    let base = svara_base_iast(b)?;
    let mut out = apply_accent_iast(base, accent(b));
    if quantity(b) == 0b11 {
        // pluta: traditional trailing numeral
        out.push('3');
    }
    Some(out)
}

/// IAST for any phoneme byte (svara or vyañjana).
pub fn phoneme_iast(b: u8) -> Option<String> {
    if crate::bytes::is_svara(b) {
        svara_iast(b)
    } else {
        vyanjana_iast(b).map(str::to_string)
    }
}

// ── Accents ──

/// A-field bits for a combining accent mark, if it is one we understand.
///
/// Acute = udātta, grave = anudātta, circumflex = svarita.
pub fn accent_bits(mark: char) -> Option<u8> {
    match mark {
        '\u{0301}' => Some(0b01),
        '\u{0300}' => Some(0b10),
        '\u{0302}' => Some(0b11),
        _ => None,
    }
}

/// Split a precomposed accented vowel into (base, combining mark).
pub fn decompose_accented(c: char) -> Option<(char, char)> {
    let (base, mark) = match c {
        'á' => ('a', '\u{0301}'),
        'à' => ('a', '\u{0300}'),
        'â' => ('a', '\u{0302}'),
        'é' => ('e', '\u{0301}'),
        'è' => ('e', '\u{0300}'),
        'ê' => ('e', '\u{0302}'),
        'í' => ('i', '\u{0301}'),
        'ì' => ('i', '\u{0300}'),
        'î' => ('i', '\u{0302}'),
        'ó' => ('o', '\u{0301}'),
        'ò' => ('o', '\u{0300}'),
        'ô' => ('o', '\u{0302}'),
        'ú' => ('u', '\u{0301}'),
        'ù' => ('u', '\u{0300}'),
        'û' => ('u', '\u{0302}'),
        _ => return None,
    };
    Some((base, mark))
}

/// Apply an accent to an IAST base token, composing to NFC where a
/// precomposed character exists (the mark lands on the final letter).
pub fn apply_accent_iast(base: &str, accent_bits: u8) -> String {
    let mark = match accent_bits {
        0b01 => '\u{0301}',
        0b10 => '\u{0300}',
        0b11 => '\u{0302}',
        _ => return base.to_string(),
    };
    let mut chars: Vec<char> = base.chars().collect();
    let last = chars.pop().unwrap_or('a');
    let mut out: String = chars.into_iter().collect();
    match precomposed(last, mark) {
        Some(c) => out.push(c),
        None => {
            out.push(last);
            out.push(mark);
        }
    }
    out
}

fn precomposed(base: char, mark: char) -> Option<char> {
    let c = match (base, mark) {
        ('a', '\u{0301}') => 'á',
        ('a', '\u{0300}') => 'à',
        ('a', '\u{0302}') => 'â',
        ('e', '\u{0301}') => 'é',
        ('e', '\u{0300}') => 'è',
        ('e', '\u{0302}') => 'ê',
        ('i', '\u{0301}') => 'í',
        ('i', '\u{0300}') => 'ì',
        ('i', '\u{0302}') => 'î',
        ('o', '\u{0301}') => 'ó',
        ('o', '\u{0300}') => 'ò',
        ('o', '\u{0302}') => 'ô',
        ('u', '\u{0301}') => 'ú',
        ('u', '\u{0300}') => 'ù',
        ('u', '\u{0302}') => 'û',
        _ => return None,
    };
    Some(c)
}

// ── Devanāgarī emission ──

pub const VIRAMA: char = '्';
pub const DEVA_CANDRABINDU: char = 'ँ';

pub const DEVA_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Bare consonant glyph for a vyañjana byte.
pub fn deva_consonant(b: u8) -> Option<&'static str> {
    let s = match b {
        0x00 => "क",
        0x01 => "ख",
        0x02 => "ग",
        0x03 => "घ",
        0x04 => "ङ",
        0x08 => "च",
        0x09 => "छ",
        0x0A => "ज",
        0x0B => "झ",
        0x0C => "ञ",
        0x10 => "ट",
        0x11 => "ठ",
        0x12 => "ड",
        0x13 => "ढ",
        0x14 => "ण",
        0x18 => "त",
        0x19 => "थ",
        0x1A => "द",
        0x1B => "ध",
        0x1C => "न",
        0x20 => "प",
        0x21 => "फ",
        0x22 => "ब",
        0x23 => "भ",
        0x24 => "म",
        0x29 => "श",
        0x2A => "ष",
        0x2B => "स",
        0x31 => "य",
        0x32 => "व",
        0x33 => "र",
        0x34 => "ल",
        0x38 => "ह",
        _ => return None,
    };
    Some(s)
}

/// Postfix mark rendering for visarga, anusvāra, jihvāmūlīya, upadhmānīya.
///
/// These are vyañjana bytes that render as marks on the preceding akṣara
/// rather than as consonant glyphs.
pub fn deva_postfix(b: u8) -> Option<&'static str> {
    let s = match b {
        0x39 => "ः",
        0x3A => "ं",
        0x3B => "ᳵ",
        0x3C => "ᳶ",
        _ => return None,
    };
    Some(s)
}

/// Independent (word-initial) vowel glyph for a svara byte, accent ignored.
pub fn deva_independent(b: u8) -> Option<&'static str> {
    let long = quantity(b) != 0b01;
    let s = match (series(b), grade(b)) {
        (0b00, 0b00) | (0b00, 0b01) | (0b00, 0b10) => {
            if long {
                "आ"
            } else {
                "अ"
            }
        }
        (0b01, 0b00) => {
            if long {
                "ई"
            } else {
                "इ"
            }
        }
        (0b01, 0b01) => "ए",
        (0b01, 0b10) => "ऐ",
        (0b10, 0b00) => {
            if long {
                "ऊ"
            } else {
                "उ"
            }
        }
        (0b10, 0b01) => "ओ",
        (0b10, 0b10) => "औ",
        (0b11, 0b00) => {
            if long {
                "ॠ"
            } else {
                "ऋ"
            }
        }
        (0b11, 0b11) => {
            if long {
                "ॡ"
            } else {
                "ऌ"
            }
        }
        _ => return None,
    };
    Some(s)
}

/// Mātrā (dependent vowel sign) for a svara byte following a consonant.
///
/// Short `a` yields the empty string: Devanāgarī output uses the explicit
/// vowel convention, so a consonant followed by `a` is just the bare glyph.
pub fn deva_matra(b: u8) -> Option<&'static str> {
    let long = quantity(b) != 0b01;
    let s = match (series(b), grade(b)) {
        (0b00, 0b00) | (0b00, 0b01) | (0b00, 0b10) => {
            if long {
                "ा"
            } else {
                ""
            }
        }
        (0b01, 0b00) => {
            if long {
                "ी"
            } else {
                "ि"
            }
        }
        (0b01, 0b01) => "े",
        (0b01, 0b10) => "ै",
        (0b10, 0b00) => {
            if long {
                "ू"
            } else {
                "ु"
            }
        }
        (0b10, 0b01) => "ो",
        (0b10, 0b10) => "ौ",
        (0b11, 0b00) => {
            if long {
                "ॄ"
            } else {
                "ृ"
            }
        }
        (0b11, 0b11) => {
            if long {
                "ॣ"
            } else {
                "ॢ"
            }
        }
        _ => return None,
    };
    Some(s)
}

/// Vedic accent mark for the A field, per traditional saṃhitā printing:
/// svarita carries the vertical stroke, anudātta the horizontal underline,
/// udātta is unmarked.
pub fn deva_accent(a: u8) -> Option<char> {
    match a {
        0b11 => Some('\u{0951}'),
        0b10 => Some('\u{0952}'),
        _ => None,
    }
}
