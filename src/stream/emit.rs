//! Text emission from decoded event streams.
//!
//! IAST output is the canonical NFC form the tokenizer accepts, so
//! encode → decode → emit is lossless. Devanāgarī output uses the explicit
//! vowel convention: every consonant not followed by a svara gets a virāma,
//! and a consonant followed by short `a` is the bare glyph.

use super::Event;
use crate::tables;

/// Output script target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Iast,
    Devanagari,
}

impl Script {
    /// Parse a CLI script name.
    pub fn parse(name: &str) -> Option<Script> {
        match name {
            "iast" => Some(Script::Iast),
            "devanagari" | "deva" => Some(Script::Devanagari),
            _ => None,
        }
    }
}

/// Render an event stream as text.
pub fn render(events: &[Event], script: Script) -> String {
    match script {
        Script::Iast => render_iast(events),
        Script::Devanagari => render_devanagari(events),
    }
}

fn render_iast(events: &[Event]) -> String {
    let mut out = String::new();
    let mut after_sankhya = false;

    for event in events {
        let was_after_sankhya = std::mem::replace(&mut after_sankhya, false);
        match event {
            Event::Phoneme(b) => {
                if let Some(s) = tables::phoneme_iast(*b) {
                    out.push_str(&s);
                }
            }
            Event::Anu => out.push_str("m\u{0310}"),
            Event::Space => out.push(' '),
            Event::Danda => out.push('|'),
            Event::DoubleDanda => out.push_str("||"),
            Event::Avagraha => out.push('\''),
            Event::Sankhya(digits) => {
                push_ascii_digits(&mut out, digits);
                after_sankhya = true;
            }
            Event::NumGlyphs(glyphs) => {
                // glyphs duplicate the SAṄKHYĀ span they follow
                if !was_after_sankhya {
                    push_ascii_digits(&mut out, glyphs);
                }
            }
            Event::PadaStart | Event::PadaEnd | Event::PhonStart | Event::PhonEnd => {}
            Event::Meta(_) => {}
        }
    }
    out
}

fn push_ascii_digits(out: &mut String, digits: &[u8]) {
    for &d in digits {
        if d <= 9 {
            out.push((b'0' + d) as char);
        }
    }
}

fn render_devanagari(events: &[Event]) -> String {
    let mut out = String::new();
    // a consonant glyph has been written and waits for a vowel or virāma
    let mut pending = false;
    // digits from a SAṄKHYĀ span, held until we know whether NUM glyphs follow
    let mut held_digits: Option<Vec<u8>> = None;

    for event in events {
        match event {
            Event::NumGlyphs(glyphs) => {
                held_digits = None;
                push_deva_digits(&mut out, glyphs);
                continue;
            }
            _ => {
                if let Some(digits) = held_digits.take() {
                    push_deva_digits(&mut out, &digits);
                }
            }
        }

        match event {
            Event::Phoneme(b) if crate::bytes::is_svara(*b) => {
                if pending {
                    if let Some(matra) = tables::deva_matra(*b) {
                        out.push_str(matra);
                    }
                    pending = false;
                } else if let Some(vowel) = tables::deva_independent(*b) {
                    out.push_str(vowel);
                }
                if let Some(mark) = tables::deva_accent(crate::bytes::accent(*b)) {
                    out.push(mark);
                }
            }
            Event::Phoneme(b) => {
                if let Some(mark) = tables::deva_postfix(*b) {
                    flush_virama(&mut out, &mut pending);
                    out.push_str(mark);
                } else if let Some(glyph) = tables::deva_consonant(*b) {
                    if pending {
                        out.push(tables::VIRAMA);
                    }
                    out.push_str(glyph);
                    pending = true;
                }
            }
            Event::Anu => {
                flush_virama(&mut out, &mut pending);
                out.push(tables::DEVA_CANDRABINDU);
            }
            Event::PadaEnd => flush_virama(&mut out, &mut pending),
            Event::Space => {
                flush_virama(&mut out, &mut pending);
                out.push(' ');
            }
            Event::Danda => {
                flush_virama(&mut out, &mut pending);
                out.push('।');
            }
            Event::DoubleDanda => {
                flush_virama(&mut out, &mut pending);
                out.push('॥');
            }
            Event::Avagraha => {
                flush_virama(&mut out, &mut pending);
                out.push('ऽ');
            }
            Event::Sankhya(digits) => {
                flush_virama(&mut out, &mut pending);
                held_digits = Some(digits.clone());
            }
            Event::PadaStart | Event::PhonStart | Event::PhonEnd => {}
            Event::NumGlyphs(_) => {}
            Event::Meta(_) => {}
        }
    }

    if let Some(digits) = held_digits {
        push_deva_digits(&mut out, &digits);
    }
    flush_virama(&mut out, &mut pending);
    out
}

fn flush_virama(out: &mut String, pending: &mut bool) {
    if *pending {
        out.push(tables::VIRAMA);
        *pending = false;
    }
}

fn push_deva_digits(out: &mut String, digits: &[u8]) {
    for &d in digits {
        if let Some(&glyph) = tables::DEVA_DIGITS.get(d as usize) {
            out.push(glyph);
        }
    }
}
