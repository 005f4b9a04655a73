//! Extraction: project a container down to one of the three content modes.
//!
//! pāṭha keeps the readable text (bhāṣā + lipi) and strips the grammar
//! envelope; bhāṣā-only additionally strips every lipi event; vyākhyā passes
//! everything through after checking that its registry references resolve.
//! Output is a fresh container with re-derived flags.

use std::path::Path;

use crate::container::{
    Chunk, Container, CHUNK_ANVY, CHUNK_BHA, CHUNK_DICT, CHUNK_LIPI, CHUNK_PHON, FLAG_HAS_LIPI,
    FLAG_HAS_META, FLAG_INTERLEAVED, FLAG_VEDIC, FLAG_VYA,
};
use crate::container::read_uleb128;
use crate::dict::DictPayload;
use crate::error::{Error, Result};
use crate::registry::{RegistryKind, RegistrySet};
use crate::stream::{decoder::decode_events, write_events, Event};

/// The three extraction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    Patha,
    BhashaOnly,
    Vyakhya,
}

impl ExtractMode {
    /// Parse a CLI mode name.
    pub fn parse(name: &str) -> Option<ExtractMode> {
        match name {
            "patha" => Some(ExtractMode::Patha),
            "bhasha-only" => Some(ExtractMode::BhashaOnly),
            "vyakhya" => Some(ExtractMode::Vyakhya),
            _ => None,
        }
    }
}

/// Encode a META envelope registry reference: marker + registry-type code +
/// ULEB128 id. The marker distinguishes verbal (0xFE) from nominal (0xFD)
/// annotations; everything past the marker layout here is carried opaquely by
/// the codec.
pub fn encode_meta_ref(kind: RegistryKind, id: u32) -> Vec<u8> {
    let marker = match kind {
        RegistryKind::Dhatu => crate::bytes::META_TAG_VERBAL,
        _ => crate::bytes::META_TAG_NOMINAL,
    };
    let mut out = vec![marker, kind.code()];
    crate::container::write_uleb128(&mut out, id);
    out
}

/// Recognize a META envelope that begins with a registry reference.
///
/// Envelopes with other content yield `None` and are carried unchanged.
pub fn meta_registry_ref(envelope: &[u8]) -> Option<(RegistryKind, u32)> {
    let (first, rest) = envelope.split_first()?;
    if *first != crate::bytes::META_TAG_VERBAL && *first != crate::bytes::META_TAG_NOMINAL {
        return None;
    }
    let (code, _) = rest.split_first()?;
    let kind = RegistryKind::from_code(*code)?;
    let (id, _) = read_uleb128(rest, 1).ok()?;
    Some((kind, id))
}

/// Extract `container` in the given mode, returning new `.slbc` bytes.
///
/// Vyākhyā resolves DICT chunks (missing external registries are an error)
/// and refuses META references that the merged table cannot resolve.
pub fn extract(
    container: &Container,
    mode: ExtractMode,
    registries: &RegistrySet,
    base_dir: Option<&Path>,
) -> Result<Vec<u8>> {
    let mut set = registries.clone();

    if mode == ExtractMode::Vyakhya {
        for chunk in &container.chunks {
            if chunk.kind == CHUNK_DICT {
                DictPayload::parse(&chunk.payload)?.resolve(&mut set, base_dir)?;
            }
        }
    }

    let mut out = Container::new(derive_flags(container.header.flags, mode));
    out.header.version = container.header.version;

    for chunk in &container.chunks {
        match chunk.kind {
            CHUNK_PHON | CHUNK_BHA | CHUNK_LIPI => {
                let events = decode_events(&chunk.payload)?;
                let filtered = filter_events(events, mode, &set)?;
                let kind = if mode == ExtractMode::BhashaOnly {
                    CHUNK_BHA
                } else {
                    chunk.kind
                };
                out.chunks.push(Chunk {
                    kind,
                    payload: write_events(&filtered),
                });
            }
            CHUNK_DICT | CHUNK_ANVY => {
                if mode == ExtractMode::Vyakhya {
                    out.chunks.push(chunk.clone());
                }
            }
            _ => {
                // META/IDX/EXT and unknown chunks ride along only in vyākhyā
                if mode == ExtractMode::Vyakhya {
                    out.chunks.push(chunk.clone());
                }
            }
        }
    }

    Ok(out.to_bytes())
}

fn filter_events(
    events: Vec<Event>,
    mode: ExtractMode,
    set: &RegistrySet,
) -> Result<Vec<Event>> {
    let mut kept = Vec::with_capacity(events.len());
    for event in events {
        match mode {
            ExtractMode::Patha | ExtractMode::BhashaOnly => {
                if matches!(event, Event::Meta(_)) {
                    continue;
                }
                let is_lipi = matches!(
                    event,
                    Event::Space
                        | Event::Danda
                        | Event::DoubleDanda
                        | Event::Avagraha
                        | Event::NumGlyphs(_)
                );
                if mode == ExtractMode::BhashaOnly && is_lipi {
                    continue;
                }
            }
            ExtractMode::Vyakhya => {
                if let Event::Meta(envelope) = &event {
                    if let Some((kind, id)) = meta_registry_ref(envelope) {
                        if set.resolve(kind, id).is_none() {
                            return Err(Error::Registry(format!(
                                "META references {} id {} which is not resolvable",
                                kind.name(),
                                id
                            )));
                        }
                    }
                }
            }
        }
        kept.push(event);
    }
    Ok(kept)
}

fn derive_flags(original: u8, mode: ExtractMode) -> u8 {
    let vedic = original & FLAG_VEDIC;
    match mode {
        ExtractMode::Patha => FLAG_HAS_LIPI | FLAG_INTERLEAVED | vedic,
        ExtractMode::BhashaOnly => vedic,
        ExtractMode::Vyakhya => original | FLAG_VYA | FLAG_HAS_META | FLAG_HAS_LIPI,
    }
}
