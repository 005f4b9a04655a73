//! The interleaved bhāṣā+lipi byte stream: event model, encoder, decoder,
//! and text emitters.

pub mod decoder;
pub mod emit;
pub mod encoder;
pub mod numeral;

pub use decoder::StreamDecoder;
pub use emit::Script;

use crate::bytes::{
    ANU, AVAGRAHA, DANDA, DOUBLE_DANDA, META_END, META_START, NUM, PADA_END, PADA_START, PHON_END,
    PHON_START, SPACE,
};

/// One event of the decoded stream.
///
/// Events are what the decoder yields and what the encoder conceptually
/// produces; [`write_event`] turns any event sequence back into bytes, which
/// is how extraction re-serializes a filtered stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Phoneme(u8),
    PadaStart,
    PadaEnd,
    PhonStart,
    PhonEnd,
    Space,
    Danda,
    DoubleDanda,
    Avagraha,
    /// Nasalization marker (candrabindu).
    Anu,
    /// SAṄKHYĀ span: decimal digits in visual L→R order.
    Sankhya(Vec<u8>),
    /// NUM span: digit glyph bytes in visual L→R order.
    NumGlyphs(Vec<u8>),
    /// META envelope: raw bytes between the outermost markers, carried
    /// through without interpretation.
    Meta(Vec<u8>),
}

/// Options controlling stream encoding.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Emit lipi-layer bytes (spaces, daṇḍas, avagraha, NUM spans). With
    /// `lipi = false` the output is the bhāṣā-canonical stream.
    pub lipi: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { lipi: true }
    }
}

/// Serialize one event back into stream bytes.
pub fn write_event(out: &mut Vec<u8>, event: &Event) {
    match event {
        Event::Phoneme(b) => out.push(*b),
        Event::PadaStart => out.push(PADA_START),
        Event::PadaEnd => out.push(PADA_END),
        Event::PhonStart => out.push(PHON_START),
        Event::PhonEnd => out.push(PHON_END),
        Event::Space => out.push(SPACE),
        Event::Danda => out.push(DANDA),
        Event::DoubleDanda => out.push(DOUBLE_DANDA),
        Event::Avagraha => out.push(AVAGRAHA),
        Event::Anu => out.push(ANU),
        Event::Sankhya(digits) => numeral::write_sankhya(out, digits),
        Event::NumGlyphs(glyphs) => {
            out.push(NUM);
            out.extend_from_slice(glyphs);
        }
        Event::Meta(bytes) => {
            out.push(META_START);
            out.extend_from_slice(bytes);
            out.push(META_END);
        }
    }
}

/// Serialize an event sequence into stream bytes.
pub fn write_events(events: &[Event]) -> Vec<u8> {
    let mut out = Vec::new();
    for event in events {
        write_event(&mut out, event);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_roundtrip_through_bytes() {
        let events = vec![
            Event::PadaStart,
            Event::Phoneme(0x00),
            Event::Phoneme(0x40),
            Event::PadaEnd,
            Event::Space,
            Event::Sankhya(vec![1, 0, 8]),
            Event::NumGlyphs(vec![1, 0, 8]),
            Event::Space,
            Event::Danda,
        ];
        let bytes = write_events(&events);
        let decoded = decoder::decode_events(&bytes).unwrap();
        assert_eq!(decoded, events);
    }
}
