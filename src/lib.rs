//! Sanskrit Linguistic Binary Codec.
//!
//! A phoneme-first binary representation of Sanskrit: IAST text is encoded
//! into bytes whose bits carry articulatory features, so Pāṇinian
//! transformations reduce to bit manipulations. Decoding targets IAST or
//! Devanāgarī.

pub mod algebra;
pub mod bytes;
pub mod config;
pub mod container;
pub mod dict;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod registry;
pub mod stream;
pub mod tables;
pub mod tokenizer;

pub use config::CodecConfig;
pub use container::{Chunk, Container, ContainerMode, Header};
pub use error::{Error, Result};
pub use extract::ExtractMode;
pub use registry::{Registry, RegistryKind, RegistrySet};
pub use stream::{EncodeOptions, Event, Script};

use container::{
    CHUNK_BHA, CHUNK_PHON, FLAG_HAS_LIPI, FLAG_INTERLEAVED, FLAG_VEDIC, VERSION_BASE,
    VERSION_NUMERAL,
};

/// Encode an IAST string into a complete `.slbc` container.
pub fn encode(iast: &str, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let tokens = tokenizer::tokenize(iast)?;
    let payload = stream::encoder::encode_tokens(&tokens, opts);

    let mut flags = 0u8;
    if opts.lipi {
        flags |= FLAG_HAS_LIPI | FLAG_INTERLEAVED;
    }
    if stream::encoder::uses_accents(&tokens) {
        flags |= FLAG_VEDIC;
    }

    let mut container = Container::new(flags);
    container.header.version = if stream::encoder::uses_numerals(&tokens) {
        VERSION_NUMERAL
    } else {
        VERSION_BASE
    };
    container.chunks.push(Chunk {
        kind: if opts.lipi { CHUNK_PHON } else { CHUNK_BHA },
        payload,
    });
    Ok(container.to_bytes())
}

/// Decode a `.slbc` container to text in the requested script.
pub fn decode(data: &[u8], script: Script) -> Result<String> {
    decode_with(data, script, false)
}

/// Decode with explicit strictness for container parsing.
pub fn decode_with(data: &[u8], script: Script, strict: bool) -> Result<String> {
    let container = Container::parse(data, strict)?;
    let mut out = String::new();
    for chunk in &container.chunks {
        if chunk.kind == CHUNK_PHON || chunk.kind == CHUNK_BHA {
            let events = stream::decoder::decode_events(&chunk.payload)?;
            out.push_str(&stream::emit::render(&events, script));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let data = encode("dharmakṣetre kurukṣetre", &EncodeOptions::default()).unwrap();
        assert_eq!(
            decode(&data, Script::Iast).unwrap(),
            "dharmakṣetre kurukṣetre"
        );
    }

    #[test]
    fn test_version_tracks_numeral_use() {
        let plain = encode("dharma", &EncodeOptions::default()).unwrap();
        assert_eq!(plain[7], 0x08);
        let with_number = encode("dharma 108", &EncodeOptions::default()).unwrap();
        assert_eq!(with_number[7], 0x09);
    }

    #[test]
    fn test_vedic_flag_tracks_accents() {
        let plain = encode("agni", &EncodeOptions::default()).unwrap();
        let accented = encode("agní", &EncodeOptions::default()).unwrap();
        let plain_header = Container::parse(&plain, true).unwrap().header;
        let accented_header = Container::parse(&accented, true).unwrap().header;
        assert!(!plain_header.is_vedic());
        assert!(accented_header.is_vedic());
    }

    #[test]
    fn test_bhasha_canonical_container() {
        let opts = EncodeOptions { lipi: false };
        let data = encode("na ca", &opts).unwrap();
        let container = Container::parse(&data, true).unwrap();
        assert_eq!(container.header.mode(), ContainerMode::BhashaCanonical);
        assert_eq!(container.chunks[0].kind, CHUNK_BHA);
        // text still decodes, minus the lipi space
        assert_eq!(decode(&data, Script::Iast).unwrap(), "naca");
    }
}
