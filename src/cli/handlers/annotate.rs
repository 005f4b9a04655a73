use std::fs;

use serde::Deserialize;

use slbc::container::{Chunk, CHUNK_BHA, CHUNK_DICT, CHUNK_PHON, FLAG_HAS_META, FLAG_VYA};
use slbc::dict::DictPayload;
use slbc::extract::encode_meta_ref;
use slbc::registry::Entry;
use slbc::stream::{decoder::decode_events, write_events, Event};
use slbc::{Container, Error, RegistryKind, RegistrySet, Result};

use crate::cli::args::AnnotateArgs;
use crate::cli::global::GlobalArgs;

use super::print_hex;

/// One annotation from the JSON input: attach a registry reference to the
/// n-th pada (0-based) of the stream.
#[derive(Debug, Deserialize)]
struct Annotation {
    pada: usize,
    registry: String,
    id: u32,
}

pub fn handle(
    args: AnnotateArgs,
    global: &GlobalArgs,
    mut registries: RegistrySet,
    strict: bool,
) -> Result<()> {
    if args.add != "vya" {
        return Err(Error::Input {
            token: args.add.clone(),
            position: 0,
        });
    }

    for path in [&args.sldr, &args.slpr, &args.slsr].into_iter().flatten() {
        registries.load_extension(path)?;
    }

    let json = fs::read_to_string(&args.from)?;
    let annotations: Vec<Annotation> =
        serde_json::from_str(&json).map_err(|err| Error::Input {
            token: format!("annotation JSON: {}", err),
            position: 0,
        })?;

    let data = fs::read(&args.input)?;
    let mut container = Container::parse(&data, strict)?;

    // resolve every reference before touching the stream
    let mut resolved: Vec<(usize, RegistryKind, u32)> = Vec::new();
    for annotation in &annotations {
        let kind = RegistryKind::parse(&annotation.registry).ok_or_else(|| Error::Input {
            token: annotation.registry.clone(),
            position: 0,
        })?;
        if registries.resolve(kind, annotation.id).is_none() {
            return Err(Error::Registry(format!(
                "annotation references {} id {} which is not resolvable",
                kind.name(),
                annotation.id
            )));
        }
        resolved.push((annotation.pada, kind, annotation.id));
    }

    let stream_index = container
        .chunks
        .iter()
        .position(|c| c.kind == CHUNK_PHON || c.kind == CHUNK_BHA)
        .ok_or_else(|| Error::Registry("container has no stream chunk to annotate".into()))?;

    let events = decode_events(&container.chunks[stream_index].payload)?;
    let pada_count = events.iter().filter(|e| **e == Event::PadaEnd).count();
    if let Some((pada, _, _)) = resolved.iter().find(|(pada, _, _)| *pada >= pada_count) {
        return Err(Error::Input {
            token: format!("pada index {} (stream has {} padas)", pada, pada_count),
            position: 0,
        });
    }

    // envelopes sit inside their pada, just before PADA_END
    let mut annotated = Vec::with_capacity(events.len() + resolved.len());
    let mut pada = 0usize;
    for event in events {
        if event == Event::PadaEnd {
            for (target, kind, id) in &resolved {
                if *target == pada {
                    annotated.push(Event::Meta(encode_meta_ref(*kind, *id)));
                }
            }
            pada += 1;
        }
        annotated.push(event);
    }
    container.chunks[stream_index].payload = write_events(&annotated);

    // entries beyond the builtin tables are embedded so the file is
    // self-contained
    let builtin = RegistrySet::builtin();
    for kind in [
        RegistryKind::Dhatu,
        RegistryKind::Pratipadika,
        RegistryKind::Sandhi,
    ] {
        let entries: Vec<Entry> = resolved
            .iter()
            .filter(|(_, k, id)| *k == kind && builtin.resolve(kind, *id).is_none())
            .filter_map(|(_, _, id)| registries.resolve(kind, *id).cloned())
            .collect();
        if !entries.is_empty() {
            let payload = DictPayload::Embedded { kind, entries };
            container.chunks.push(Chunk {
                kind: CHUNK_DICT,
                payload: payload.to_bytes(),
            });
        }
    }

    container.header.flags |= FLAG_VYA | FLAG_HAS_META;
    let out = container.to_bytes();

    match &args.output {
        Some(path) => {
            fs::write(path, &out)?;
            if !global.quiet {
                eprintln!("wrote {} bytes to {}", out.len(), path.display());
            }
        }
        None => print_hex(&out),
    }

    Ok(())
}
