//! IAST tokenizer.
//!
//! Longest-match lexing over the fixed phoneme alphabet: digraphs (`kh`,
//! `dh`, `ai`, `au`, candrabindu `m̐`) win over their single-letter prefixes.
//! Whitespace collapses to a single [`Token::Space`]; `|`/`||` become daṇḍas;
//! `'` and `ऽ` become avagraha; ASCII digit runs accumulate into
//! [`Token::Number`] with leading zeros preserved. Combining accent marks
//! (acute/grave/circumflex) attach to the vowel they follow.

use crate::bytes::ANU;
use crate::error::{Error, Result};
use crate::tables;

/// A lexical unit of IAST input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Svara(u8),
    Vyanjana(u8),
    /// Candrabindu nasalization, carried as the ANU control byte.
    Anu,
    Space,
    Danda,
    DoubleDanda,
    Avagraha,
    /// A run of decimal digits, leading zeros preserved.
    Number(String),
}

/// Tokenize an IAST string.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars = decompose(input);
    let len = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < len {
        let ch = chars[i];

        if ch == '\r' {
            i += 1;
            continue;
        }

        // Whitespace collapses
        if ch == ' ' || ch == '\t' || ch == '\n' {
            if tokens.last() != Some(&Token::Space) {
                tokens.push(Token::Space);
            }
            i += 1;
            continue;
        }

        if ch == '|' {
            if chars.get(i + 1) == Some(&'|') {
                tokens.push(Token::DoubleDanda);
                i += 2;
            } else {
                tokens.push(Token::Danda);
                i += 1;
            }
            continue;
        }

        if ch == '\'' || ch == 'ऽ' {
            tokens.push(Token::Avagraha);
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() {
            let start = i;
            while i < len && chars[i].is_ascii_digit() {
                i += 1;
            }
            tokens.push(Token::Number(chars[start..i].iter().collect()));
            continue;
        }

        // OṂkāra: no dedicated byte, encoded analytically as o + ṃ
        if ch == 'ॐ' {
            tokens.push(Token::Svara(0x89));
            tokens.push(Token::Vyanjana(0x3A));
            i += 1;
            continue;
        }

        if let Some((token, consumed)) = match_phoneme(&chars, i) {
            i += consumed;
            // A combining accent mark binds to the vowel it follows
            if let Token::Svara(byte) = token {
                if let Some(bits) = chars.get(i).copied().and_then(tables::accent_bits) {
                    tokens.push(Token::Svara(byte | (bits << 4)));
                    i += 1;
                    continue;
                }
            }
            tokens.push(token);
            continue;
        }

        return Err(Error::Input {
            token: ch.to_string(),
            position: i,
        });
    }

    Ok(tokens)
}

/// Longest-match a phoneme at position `i`. Returns the token and the number
/// of characters consumed.
fn match_phoneme(chars: &[char], i: usize) -> Option<(Token, usize)> {
    // Two-character candidates first
    if i + 1 < chars.len() {
        let pair: String = chars[i..i + 2].iter().collect();
        for (token, byte) in tables::VYANJANA_TOKENS {
            if token.chars().count() == 2 && token == pair {
                return Some((vyanjana_token(byte), 2));
            }
        }
        for (token, byte) in tables::SVARA_TOKENS {
            if token.chars().count() == 2 && token == pair {
                return Some((Token::Svara(byte), 2));
            }
        }
    }

    let single = chars[i].to_string();
    for (token, byte) in tables::VYANJANA_TOKENS {
        if token == single {
            return Some((vyanjana_token(byte), 1));
        }
    }
    for (token, byte) in tables::SVARA_TOKENS {
        if token == single {
            return Some((Token::Svara(byte), 1));
        }
    }
    None
}

fn vyanjana_token(byte: u8) -> Token {
    if byte == ANU {
        Token::Anu
    } else {
        Token::Vyanjana(byte)
    }
}

/// Expand precomposed accented vowels (á, í, …) into base + combining mark so
/// that longest-match sees the plain letters.
fn decompose(input: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(input.len());
    for c in input.chars() {
        match tables::decompose_accented(c) {
            Some((base, mark)) => {
                out.push(base);
                out.push(mark);
            }
            None => out.push(c),
        }
    }
    out
}

/// The phoneme bytes of a token sequence, pada and lipi structure ignored.
pub fn phoneme_bytes(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::Svara(b) | Token::Vyanjana(b) => out.push(*b),
            Token::Anu => out.push(ANU),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ka() {
        let tokens = tokenize("ka").unwrap();
        assert_eq!(tokens, vec![Token::Vyanjana(0x00), Token::Svara(0x40)]);
    }

    #[test]
    fn test_aspirate_wins_over_prefix() {
        let tokens = tokenize("kha").unwrap();
        assert_eq!(tokens, vec![Token::Vyanjana(0x01), Token::Svara(0x40)]);
    }

    #[test]
    fn test_diphthongs() {
        assert_eq!(tokenize("ai").unwrap(), vec![Token::Svara(0x86)]);
        assert_eq!(tokenize("au").unwrap(), vec![Token::Svara(0x8A)]);
        // 'a' followed by consonant stays short
        assert_eq!(
            tokenize("ak").unwrap(),
            vec![Token::Svara(0x40), Token::Vyanjana(0x00)]
        );
    }

    #[test]
    fn test_krsna_bytes() {
        let tokens = tokenize("kṛṣṇa").unwrap();
        assert_eq!(phoneme_bytes(&tokens), vec![0x00, 0x4C, 0x2A, 0x14, 0x40]);
    }

    #[test]
    fn test_whitespace_collapses() {
        let tokens = tokenize("na  \t ca").unwrap();
        let spaces = tokens.iter().filter(|t| **t == Token::Space).count();
        assert_eq!(spaces, 1);
    }

    #[test]
    fn test_dandas() {
        assert_eq!(tokenize("|").unwrap(), vec![Token::Danda]);
        assert_eq!(tokenize("||").unwrap(), vec![Token::DoubleDanda]);
    }

    #[test]
    fn test_number_preserves_leading_zeros() {
        let tokens = tokenize("007").unwrap();
        assert_eq!(tokens, vec![Token::Number("007".into())]);
    }

    #[test]
    fn test_accents() {
        // combining acute after i → udātta i
        let tokens = tokenize("i\u{0301}").unwrap();
        assert_eq!(tokens, vec![Token::Svara(0x54)]);
        // precomposed í is equivalent
        assert_eq!(tokenize("í").unwrap(), vec![Token::Svara(0x54)]);
        // grave → anudātta
        assert_eq!(tokenize("à").unwrap(), vec![Token::Svara(0x60)]);
    }

    #[test]
    fn test_candrabindu() {
        let tokens = tokenize("m\u{0310}").unwrap();
        assert_eq!(tokens, vec![Token::Anu]);
        // plain m is still the labial nasal
        assert_eq!(tokenize("m").unwrap(), vec![Token::Vyanjana(0x24)]);
    }

    #[test]
    fn test_omkara_is_analytic() {
        let tokens = tokenize("ॐ").unwrap();
        assert_eq!(tokens, vec![Token::Svara(0x89), Token::Vyanjana(0x3A)]);
    }

    #[test]
    fn test_unknown_character_reports_position() {
        let err = tokenize("kaXa").unwrap_err();
        match err {
            Error::Input { token, position } => {
                assert_eq!(token, "X");
                assert_eq!(position, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
