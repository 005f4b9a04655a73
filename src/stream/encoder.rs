//! Token stream → interleaved bhāṣā+lipi bytes.
//!
//! Padas are wrapped in PADA_START/PADA_END; lipi punctuation sits between
//! them. Numerals emit the SAṄKHYĀ span always and the NUM glyph span only
//! when lipi output is enabled — bhāṣā bytes are mandatory, lipi bytes exist
//! only in streams whose container declares HAS_LIPI.

use super::{numeral, EncodeOptions};
use crate::bytes::{ANU, AVAGRAHA, DANDA, DOUBLE_DANDA, PADA_END, PADA_START, SPACE};
use crate::tokenizer::Token;

/// Encode a token sequence into a chunk payload.
pub fn encode_tokens(tokens: &[Token], opts: &EncodeOptions) -> Vec<u8> {
    let mut out = Vec::new();
    let mut in_pada = false;
    // a NUM span is open-ended until a byte ≥ 0x10 follows it
    let mut num_span_open = false;

    for token in tokens {
        let was_num_span = std::mem::replace(&mut num_span_open, false);
        match token {
            Token::Svara(b) | Token::Vyanjana(b) => {
                open_pada(&mut out, &mut in_pada);
                out.push(*b);
            }
            Token::Anu => {
                open_pada(&mut out, &mut in_pada);
                out.push(ANU);
            }
            Token::Space => {
                close_pada(&mut out, &mut in_pada);
                if opts.lipi {
                    out.push(SPACE);
                }
            }
            Token::Danda => {
                close_pada(&mut out, &mut in_pada);
                if opts.lipi {
                    // DANDA is 0x0F and would read as a NUM glyph byte; a
                    // SPACE closes the span first
                    if was_num_span {
                        out.push(SPACE);
                    }
                    out.push(DANDA);
                }
            }
            Token::DoubleDanda => {
                close_pada(&mut out, &mut in_pada);
                if opts.lipi {
                    out.push(DOUBLE_DANDA);
                }
            }
            Token::Avagraha => {
                // lipi-layer, but appears inline in the pada it elides into
                if opts.lipi {
                    open_pada(&mut out, &mut in_pada);
                    out.push(AVAGRAHA);
                }
            }
            Token::Number(digits) => {
                close_pada(&mut out, &mut in_pada);
                let values: Vec<u8> = digits.bytes().map(|c| c - b'0').collect();
                numeral::write_sankhya(&mut out, &values);
                if opts.lipi {
                    numeral::write_num(&mut out, &values);
                    num_span_open = true;
                }
            }
        }
    }

    close_pada(&mut out, &mut in_pada);
    out
}

fn open_pada(out: &mut Vec<u8>, in_pada: &mut bool) {
    if !*in_pada {
        out.push(PADA_START);
        *in_pada = true;
    }
}

fn close_pada(out: &mut Vec<u8>, in_pada: &mut bool) {
    if *in_pada {
        out.push(PADA_END);
        *in_pada = false;
    }
}

/// True if any token carries a Vedic accent (non-neutral A field).
pub fn uses_accents(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| match t {
        Token::Svara(b) => crate::bytes::accent(*b) != 0,
        _ => false,
    })
}

/// True if the stream needs the numeral extension.
pub fn uses_numerals(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| matches!(t, Token::Number(_)))
}
