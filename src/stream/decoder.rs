//! Stateful stream decoder.
//!
//! The decoder is a tagged state machine: the meaning of a byte is a function
//! of the current state, never of the raw value alone. A ULEB128 count byte
//! that happens to equal META_START is a count byte, because the machine is
//! in the count state when it reads it. NUM spans end by pushback: the first
//! byte ≥ 0x10 after the glyphs is left for the enclosing state to consume.

use super::{numeral, Event};
use crate::bytes::{self, classify, ByteClass};
use crate::error::{Error, Result};
use crate::tables;

enum State {
    Normal,
    InPada,
    InMeta {
        depth: u32,
        buf: Vec<u8>,
        from_pada: bool,
    },
    SankhyaCount {
        acc: u64,
        shift: u32,
        from_pada: bool,
    },
    SankhyaPadas {
        remaining: u32,
        digits: Vec<u8>,
        pada: Option<Vec<u8>>,
        from_pada: bool,
    },
    InNum {
        glyphs: Vec<u8>,
        from_pada: bool,
    },
}

/// Decodes a chunk payload into [`Event`]s.
pub struct StreamDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    state: State,
}

impl<'a> StreamDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        StreamDecoder {
            data,
            pos: 0,
            state: State::Normal,
        }
    }

    /// Byte offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn span_err<T>(&self, reason: impl Into<String>) -> Result<T> {
        Err(Error::Span {
            offset: self.pos,
            reason: reason.into(),
        })
    }

    fn resume(&mut self, from_pada: bool) {
        self.state = if from_pada {
            State::InPada
        } else {
            State::Normal
        };
    }

    /// Yield the next event, or `None` at a clean end of stream.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            if self.pos >= self.data.len() {
                return self.finish();
            }
            let b = self.data[self.pos];

            match std::mem::replace(&mut self.state, State::Normal) {
                state @ (State::Normal | State::InPada) => {
                    let in_pada = matches!(state, State::InPada);
                    self.state = state;
                    if let Some(event) = self.step_text(b, in_pada)? {
                        return Ok(Some(event));
                    }
                }

                State::InMeta {
                    depth,
                    mut buf,
                    from_pada,
                } => {
                    self.pos += 1;
                    match b {
                        bytes::META_START => {
                            buf.push(b);
                            self.state = State::InMeta {
                                depth: depth + 1,
                                buf,
                                from_pada,
                            };
                        }
                        bytes::META_END if depth == 1 => {
                            self.resume(from_pada);
                            return Ok(Some(Event::Meta(buf)));
                        }
                        bytes::META_END => {
                            buf.push(b);
                            self.state = State::InMeta {
                                depth: depth - 1,
                                buf,
                                from_pada,
                            };
                        }
                        _ => {
                            buf.push(b);
                            self.state = State::InMeta {
                                depth,
                                buf,
                                from_pada,
                            };
                        }
                    }
                }

                State::SankhyaCount {
                    acc,
                    shift,
                    from_pada,
                } => {
                    if shift > 28 {
                        return self.span_err("SAṄKHYĀ count ULEB128 exceeds 5 bytes");
                    }
                    self.pos += 1;
                    let acc = acc | (((b & 0x7F) as u64) << shift);
                    if b & 0x80 != 0 {
                        self.state = State::SankhyaCount {
                            acc,
                            shift: shift + 7,
                            from_pada,
                        };
                        continue;
                    }
                    if acc > u32::MAX as u64 {
                        return self.span_err("SAṄKHYĀ count exceeds u32 range");
                    }
                    if acc == 0 {
                        return self.span_err("SAṄKHYĀ span with zero digits");
                    }
                    self.state = State::SankhyaPadas {
                        remaining: acc as u32,
                        digits: Vec::new(),
                        pada: None,
                        from_pada,
                    };
                }

                State::SankhyaPadas {
                    remaining,
                    mut digits,
                    pada,
                    from_pada,
                } => {
                    self.pos += 1;
                    match pada {
                        None => {
                            if b != bytes::PADA_START {
                                return self
                                    .span_err("expected PADA_START inside SAṄKHYĀ span");
                            }
                            self.state = State::SankhyaPadas {
                                remaining,
                                digits,
                                pada: Some(Vec::new()),
                                from_pada,
                            };
                        }
                        Some(mut buf) => {
                            if b != bytes::PADA_END {
                                buf.push(b);
                                self.state = State::SankhyaPadas {
                                    remaining,
                                    digits,
                                    pada: Some(buf),
                                    from_pada,
                                };
                                continue;
                            }
                            let digit = match numeral::lookup_digit_word(&buf) {
                                Some(d) => d,
                                None => {
                                    return self.span_err(
                                        "digit-pada is not in the digit-word vocabulary",
                                    )
                                }
                            };
                            digits.push(digit);
                            if remaining == 1 {
                                // units-first on the wire, visual order out
                                digits.reverse();
                                self.resume(from_pada);
                                return Ok(Some(Event::Sankhya(digits)));
                            }
                            self.state = State::SankhyaPadas {
                                remaining: remaining - 1,
                                digits,
                                pada: None,
                                from_pada,
                            };
                        }
                    }
                }

                State::InNum { mut glyphs, from_pada } => {
                    if b >= 0x10 {
                        // implicit termination: push the byte back
                        self.resume(from_pada);
                        return Ok(Some(Event::NumGlyphs(glyphs)));
                    }
                    self.pos += 1;
                    glyphs.push(b);
                    self.state = State::InNum { glyphs, from_pada };
                }
            }
        }
    }

    /// Handle one byte in the Normal/InPada states. `None` means the byte was
    /// consumed into a span state and no event is ready yet.
    fn step_text(&mut self, b: u8, in_pada: bool) -> Result<Option<Event>> {
        match classify(b) {
            ByteClass::Svara | ByteClass::Vyanjana => {
                if tables::phoneme_iast(b).is_none() {
                    return self.span_err(format!("unassigned phoneme byte 0x{:02X}", b));
                }
                self.pos += 1;
                Ok(Some(Event::Phoneme(b)))
            }
            ByteClass::BhashaControl => {
                self.pos += 1;
                match b {
                    bytes::PADA_START => {
                        self.state = State::InPada;
                        Ok(Some(Event::PadaStart))
                    }
                    bytes::PADA_END => {
                        self.state = State::Normal;
                        Ok(Some(Event::PadaEnd))
                    }
                    bytes::PHON_START => Ok(Some(Event::PhonStart)),
                    bytes::PHON_END => Ok(Some(Event::PhonEnd)),
                    bytes::ANU => Ok(Some(Event::Anu)),
                    bytes::META_START => {
                        self.state = State::InMeta {
                            depth: 1,
                            buf: Vec::new(),
                            from_pada: in_pada,
                        };
                        Ok(None)
                    }
                    bytes::META_END => {
                        self.pos -= 1;
                        self.span_err("META_END without matching META_START")
                    }
                    bytes::SANKHYA_START => {
                        self.state = State::SankhyaCount {
                            acc: 0,
                            shift: 0,
                            from_pada: in_pada,
                        };
                        Ok(None)
                    }
                    _ => Err(Error::Invariant("unhandled bhāṣā control byte")),
                }
            }
            ByteClass::LipiControl => {
                self.pos += 1;
                match b {
                    bytes::SPACE => Ok(Some(Event::Space)),
                    bytes::DANDA => Ok(Some(Event::Danda)),
                    bytes::DOUBLE_DANDA => Ok(Some(Event::DoubleDanda)),
                    bytes::AVAGRAHA => Ok(Some(Event::Avagraha)),
                    bytes::NUM => {
                        self.state = State::InNum {
                            glyphs: Vec::new(),
                            from_pada: in_pada,
                        };
                        Ok(None)
                    }
                    _ => {
                        self.pos -= 1;
                        self.span_err(format!(
                            "unsupported lipi control byte 0x{:02X}",
                            b
                        ))
                    }
                }
            }
            ByteClass::Reserved => {
                self.span_err(format!("reserved byte 0x{:02X} in stream", b))
            }
        }
    }

    fn finish(&mut self) -> Result<Option<Event>> {
        match std::mem::replace(&mut self.state, State::Normal) {
            State::Normal | State::InPada => Ok(None),
            State::InNum { glyphs, .. } => {
                // end of payload terminates the span
                Ok(Some(Event::NumGlyphs(glyphs)))
            }
            State::InMeta { .. } => self.span_err("unterminated META block"),
            State::SankhyaCount { .. } => self.span_err("truncated SAṄKHYĀ count"),
            State::SankhyaPadas { .. } => {
                self.span_err("SAṄKHYĀ digit count exceeds stream end")
            }
        }
    }
}

/// Decode a whole payload into its event sequence.
pub fn decode_events(payload: &[u8]) -> Result<Vec<Event>> {
    let mut decoder = StreamDecoder::new(payload);
    let mut events = Vec::new();
    while let Some(event) = decoder.next_event()? {
        events.push(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{encoder::encode_tokens, EncodeOptions};
    use crate::tokenizer::tokenize;

    fn decode(input: &str) -> Vec<Event> {
        let bytes = encode_tokens(&tokenize(input).unwrap(), &EncodeOptions::default());
        decode_events(&bytes).unwrap()
    }

    #[test]
    fn test_simple_pada_events() {
        assert_eq!(
            decode("ka"),
            vec![
                Event::PadaStart,
                Event::Phoneme(0x00),
                Event::Phoneme(0x40),
                Event::PadaEnd,
            ]
        );
    }

    #[test]
    fn test_sankhya_count_byte_is_not_meta_start() {
        // a 6-digit number has ULEB count 0x06 == META_START; the decoder
        // must read it as a count because of the state it is in
        let events = decode("123456");
        assert!(events.contains(&Event::Sankhya(vec![1, 2, 3, 4, 5, 6])));
    }

    #[test]
    fn test_num_span_pushback() {
        // after the NUM glyphs, the next pada must still decode
        let events = decode("12 ka");
        let expected_tail = vec![
            Event::Space,
            Event::PadaStart,
            Event::Phoneme(0x00),
            Event::Phoneme(0x40),
            Event::PadaEnd,
        ];
        assert!(events.ends_with(&expected_tail));
        assert!(events.contains(&Event::NumGlyphs(vec![1, 2])));
    }

    #[test]
    fn test_num_span_swallows_any_byte_below_0x10() {
        use crate::bytes::{META_END, NUM, SPACE};
        // every byte < 0x10 after NUM is a glyph token, even ones whose
        // values coincide with controls like META_END (0x0E) and DANDA (0x0F)
        let payload = vec![NUM, 0x01, 0x0A, META_END, 0x0F, SPACE];
        let events = decode_events(&payload).unwrap();
        assert_eq!(
            events,
            vec![Event::NumGlyphs(vec![0x01, 0x0A, 0x0E, 0x0F]), Event::Space]
        );
    }

    #[test]
    fn test_num_span_terminates_at_end_of_stream() {
        let payload = vec![crate::bytes::NUM, 0x0B];
        let events = decode_events(&payload).unwrap();
        assert_eq!(events, vec![Event::NumGlyphs(vec![0x0B])]);
    }

    #[test]
    fn test_meta_block_nesting() {
        use crate::bytes::{META_END, META_START, PADA_END, PADA_START};
        let payload = vec![
            PADA_START,
            0x00,
            META_START,
            0xFE,
            META_START,
            0x01,
            META_END,
            0x02,
            META_END,
            0x40,
            PADA_END,
        ];
        let events = decode_events(&payload).unwrap();
        assert_eq!(
            events,
            vec![
                Event::PadaStart,
                Event::Phoneme(0x00),
                Event::Meta(vec![0xFE, META_START, 0x01, META_END, 0x02]),
                Event::Phoneme(0x40),
                Event::PadaEnd,
            ]
        );
    }

    #[test]
    fn test_unterminated_meta_is_an_error() {
        use crate::bytes::META_START;
        let payload = vec![META_START, 0x01, 0x02];
        assert!(decode_events(&payload).is_err());
    }

    #[test]
    fn test_bad_digit_word_is_an_error() {
        use crate::bytes::{PADA_END, PADA_START, SANKHYA_START};
        // count 1, but the pada spells "ka", not a digit-word
        let payload = vec![SANKHYA_START, 0x01, PADA_START, 0x00, 0x40, PADA_END];
        let err = decode_events(&payload).unwrap_err();
        assert!(err.to_string().contains("digit-word"));
    }

    #[test]
    fn test_sankhya_truncation_is_an_error() {
        use crate::bytes::{PADA_END, PADA_START, SANKHYA_START};
        // count 2 but only one digit-pada present
        let mut payload = vec![SANKHYA_START, 0x02, PADA_START];
        payload.extend_from_slice(numeral::DIGIT_WORDS[1]);
        payload.push(PADA_END);
        let err = decode_events(&payload).unwrap_err();
        assert!(err.to_string().contains("exceeds stream end"));
    }

    #[test]
    fn test_reserved_byte_is_an_error() {
        assert!(decode_events(&[0x05]).is_err());
        assert!(decode_events(&[0x3D]).is_err());
    }

    #[test]
    fn test_offsets_in_errors() {
        let payload = vec![0x26, 0x00, 0x40, 0x2E, 0x05];
        match decode_events(&payload).unwrap_err() {
            Error::Span { offset, .. } => assert_eq!(offset, 4),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
