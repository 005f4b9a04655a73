//! Algebraic operations on phoneme bytes.
//!
//! Svara algebra: guṇa, vṛddhi, dīrgha, hrasva, savarṇa-dīrgha.
//! Vyañjana algebra (varga only): jaśtva, voice/aspiration toggles, nasal.
//! Saṃprasāraṇa: sonorant ↔ svara, as a four-entry lookup.
//!
//! The raw operations are pure `u8 → u8` and assume their domain; calling one
//! on the wrong byte shape is a programmer error. Dynamic callers (the CLI
//! `transform` command) go through [`apply`], which validates the domain and
//! returns [`Error::Domain`] instead.

use crate::bytes::{is_svara, is_varga, series};
use crate::error::{Error, Result};

// ── Svara algebra ──
//
// Field masks: Q = bits 7:6, A = 5:4, S = 3:2, G = 1:0.

/// Guṇa grade: G := 01, Q := 10. Accent and series preserved.
#[inline]
pub fn guna(b: u8) -> u8 {
    debug_assert!(is_svara(b));
    (b & 0b0011_1100) | 0b1000_0001
}

/// Vṛddhi grade: G := 10, Q := 10. Accent and series preserved.
#[inline]
pub fn vrddhi(b: u8) -> u8 {
    debug_assert!(is_svara(b));
    (b & 0b0011_1100) | 0b1000_0010
}

/// Lengthen: Q := 10. Everything else preserved.
#[inline]
pub fn dirgha(b: u8) -> u8 {
    debug_assert!(is_svara(b));
    (b & 0b0011_1111) | 0b1000_0000
}

/// Shorten: Q := 01. Everything else preserved.
#[inline]
pub fn hrasva(b: u8) -> u8 {
    debug_assert!(is_svara(b));
    (b & 0b0011_1111) | 0b0100_0000
}

/// Savarṇa-dīrgha: two same-series svaras coalesce to the dīrgha of the
/// first. The caller must have checked that the series match.
#[inline]
pub fn savarna_dirgha(a: u8, b: u8) -> u8 {
    debug_assert!(is_svara(a) && is_svara(b));
    debug_assert_eq!(series(a), series(b));
    let _ = b;
    dirgha(a)
}

// ── Vyañjana algebra (varga rows only) ──

/// Jaśtva: COLUMN := 010 (voiced unaspirated), the pada-final replacement.
#[inline]
pub fn jastva(b: u8) -> u8 {
    debug_assert!(is_varga(b));
    (b & 0b1111_1000) | 0b010
}

/// Toggle voicing: COLUMN ^= 010. Self-inverse.
#[inline]
pub fn toggle_voice(b: u8) -> u8 {
    debug_assert!(is_varga(b));
    b ^ 0b010
}

/// Toggle aspiration: COLUMN ^= 001. Self-inverse.
#[inline]
pub fn toggle_aspiration(b: u8) -> u8 {
    debug_assert!(is_varga(b));
    b ^ 0b001
}

/// Nasalize: COLUMN := 100.
#[inline]
pub fn make_nasal(b: u8) -> u8 {
    debug_assert!(is_varga(b));
    (b & 0b1111_1000) | 0b100
}

/// The nasal homorganic with a varga consonant: PLACE copied, COLUMN := 100.
#[inline]
pub fn homorganic_nasal_for(b: u8) -> u8 {
    debug_assert!(is_varga(b));
    (b & 0b1111_1000) | 0b100
}

// ── Saṃprasāraṇa ──
//
// An explicit lookup, not a bit transform: la ↔ ḷ breaks the otherwise
// regular series-to-place correspondence, so copying bits would be wrong.

/// Sonorant → svara: ya→i, va→u, ra→ṛ, la→ḷ.
pub fn samprasarana_to_svara(b: u8) -> u8 {
    match b {
        0x31 => 0x44,
        0x32 => 0x48,
        0x33 => 0x4C,
        0x34 => 0x4F,
        _ => panic!("saṃprasāraṇa is defined only for ya/va/ra/la, got 0x{:02X}", b),
    }
}

/// Svara → sonorant: the reverse lookup.
pub fn samprasarana_to_sonorant(b: u8) -> u8 {
    match b {
        0x44 => 0x31,
        0x48 => 0x32,
        0x4C => 0x33,
        0x4F => 0x34,
        _ => panic!(
            "reverse saṃprasāraṇa is defined only for i/u/ṛ/ḷ, got 0x{:02X}",
            b
        ),
    }
}

// ── Guarded dispatch ──

/// A unary algebra operation, named for dynamic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Guna,
    Vrddhi,
    Dirgha,
    Hrasva,
    Jastva,
    ToggleVoice,
    ToggleAspiration,
    Nasal,
    HomorganicNasal,
    SamprasaranaSvara,
    SamprasaranaSonorant,
}

impl Op {
    /// Parse a CLI operation name.
    pub fn parse(name: &str) -> Option<Op> {
        let op = match name {
            "guna" => Op::Guna,
            "vrddhi" => Op::Vrddhi,
            "dirgha" => Op::Dirgha,
            "hrasva" => Op::Hrasva,
            "jastva" => Op::Jastva,
            "toggle-voice" => Op::ToggleVoice,
            "toggle-aspiration" => Op::ToggleAspiration,
            "nasal" => Op::Nasal,
            "homorganic-nasal" => Op::HomorganicNasal,
            "samprasarana-svara" => Op::SamprasaranaSvara,
            "samprasarana-sonorant" => Op::SamprasaranaSonorant,
            _ => return None,
        };
        Some(op)
    }

    pub fn name(self) -> &'static str {
        match self {
            Op::Guna => "guṇa",
            Op::Vrddhi => "vṛddhi",
            Op::Dirgha => "dīrgha",
            Op::Hrasva => "hrasva",
            Op::Jastva => "jaśtva",
            Op::ToggleVoice => "toggle-voice",
            Op::ToggleAspiration => "toggle-aspiration",
            Op::Nasal => "nasal",
            Op::HomorganicNasal => "homorganic-nasal",
            Op::SamprasaranaSvara => "saṃprasāraṇa→svara",
            Op::SamprasaranaSonorant => "saṃprasāraṇa→sonorant",
        }
    }
}

/// Apply an operation after validating the input byte's shape.
pub fn apply(op: Op, b: u8) -> Result<u8> {
    let domain_err = Error::Domain {
        op: op.name(),
        byte: b,
    };
    match op {
        Op::Guna | Op::Vrddhi | Op::Dirgha | Op::Hrasva => {
            if !is_svara(b) {
                return Err(domain_err);
            }
            Ok(match op {
                Op::Guna => guna(b),
                Op::Vrddhi => vrddhi(b),
                Op::Dirgha => dirgha(b),
                _ => hrasva(b),
            })
        }
        Op::Jastva | Op::ToggleVoice | Op::ToggleAspiration | Op::Nasal | Op::HomorganicNasal => {
            if !is_varga(b) {
                return Err(domain_err);
            }
            Ok(match op {
                Op::Jastva => jastva(b),
                Op::ToggleVoice => toggle_voice(b),
                Op::ToggleAspiration => toggle_aspiration(b),
                Op::Nasal => make_nasal(b),
                _ => homorganic_nasal_for(b),
            })
        }
        Op::SamprasaranaSvara => match b {
            0x31..=0x34 => Ok(samprasarana_to_svara(b)),
            _ => Err(domain_err),
        },
        Op::SamprasaranaSonorant => match b {
            0x44 | 0x48 | 0x4C | 0x4F => Ok(samprasarana_to_sonorant(b)),
            _ => Err(domain_err),
        },
    }
}

/// Savarṇa-dīrgha with domain and series validation.
pub fn savarna_dirgha_checked(a: u8, b: u8) -> Result<u8> {
    if !is_svara(a) {
        return Err(Error::Domain {
            op: "savarṇa-dīrgha",
            byte: a,
        });
    }
    if !is_svara(b) || series(a) != series(b) {
        return Err(Error::Domain {
            op: "savarṇa-dīrgha",
            byte: b,
        });
    }
    Ok(savarna_dirgha(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::{accent, is_vyanjana};

    #[test]
    fn test_guna_i_is_e() {
        assert_eq!(guna(0x44), 0x85);
    }

    #[test]
    fn test_vrddhi_i_is_ai() {
        assert_eq!(vrddhi(0x44), 0x86);
    }

    #[test]
    fn test_jastva_ka_is_ga() {
        assert_eq!(jastva(0x00), 0x02);
        // voiceless column 0: jaśtva coincides with OR-ing the voice bit
        assert_eq!(jastva(0x00), 0x00 | 0b010);
    }

    #[test]
    fn test_jastva_kha_drops_aspiration() {
        // kh (voiceless aspirated) → g, not gh
        assert_eq!(jastva(0x01), 0x02);
    }

    #[test]
    fn test_toggles_are_involutions() {
        for b in 0..=255u8 {
            if !is_varga(b) {
                continue;
            }
            assert_eq!(toggle_voice(toggle_voice(b)), b);
            assert_eq!(toggle_aspiration(toggle_aspiration(b)), b);
        }
    }

    #[test]
    fn test_quantity_ops_compose() {
        for b in 0..=255u8 {
            if !is_svara(b) {
                continue;
            }
            assert_eq!(hrasva(dirgha(b)), hrasva(b));
            assert_eq!(dirgha(hrasva(b)), dirgha(b));
        }
    }

    #[test]
    fn test_accent_preserved() {
        // i with udātta (0x54): guṇa must keep A=01
        let r = guna(0x54);
        assert_eq!(r, 0x95);
        assert_eq!(accent(r), 0b01);
        let r = vrddhi(0x54);
        assert_eq!(accent(r), 0b01);
        let r = dirgha(0x54);
        assert_eq!(accent(r), 0b01);
    }

    #[test]
    fn test_samprasarana_is_a_lookup() {
        assert_eq!(samprasarana_to_svara(0x31), 0x44); // ya → i
        assert_eq!(samprasarana_to_svara(0x32), 0x48); // va → u
        assert_eq!(samprasarana_to_svara(0x33), 0x4C); // ra → ṛ
        assert_eq!(samprasarana_to_svara(0x34), 0x4F); // la → ḷ
        // and back
        for c in [0x31u8, 0x32, 0x33, 0x34] {
            assert_eq!(samprasarana_to_sonorant(samprasarana_to_svara(c)), c);
        }
    }

    #[test]
    fn test_homorganic_nasals() {
        assert_eq!(homorganic_nasal_for(0x00), 0x04); // k-row → ṅ
        assert_eq!(homorganic_nasal_for(0x1A), 0x1C); // d-row → n
        assert_eq!(homorganic_nasal_for(0x22), 0x24); // b-row → m
        for b in 0..=255u8 {
            if is_varga(b) {
                assert!(is_vyanjana(homorganic_nasal_for(b)));
            }
        }
    }

    #[test]
    fn test_apply_guards_domain() {
        // jaśtva on a sibilant is a domain error
        assert!(apply(Op::Jastva, 0x29).is_err());
        // guṇa on a consonant is a domain error
        assert!(apply(Op::Guna, 0x00).is_err());
        // valid paths succeed
        assert_eq!(apply(Op::Guna, 0x44).unwrap(), 0x85);
        assert_eq!(apply(Op::SamprasaranaSvara, 0x34).unwrap(), 0x4F);
        assert!(apply(Op::SamprasaranaSvara, 0x38).is_err());
    }

    #[test]
    fn test_savarna_dirgha() {
        // a + ā → ā
        assert_eq!(savarna_dirgha_checked(0x40, 0x80).unwrap(), 0x80);
        // i + i → ī
        assert_eq!(savarna_dirgha_checked(0x44, 0x44).unwrap(), 0x84);
        // i + u: different series
        assert!(savarna_dirgha_checked(0x44, 0x48).is_err());
    }
}
