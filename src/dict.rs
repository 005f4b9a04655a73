//! DICT chunk payloads.
//!
//! A DICT chunk binds registry entries to a container: inline (Embedded), by
//! reference to a registry file (External), or both (Hybrid: external block
//! plus inline overrides). Layout: `registry-type (1) | mode (1) |
//! mode-specific`. Resolution precedence is builtin < external <
//! embedded/hybrid overrides — unlike extension merging, later sources may
//! shadow earlier ones here.

use std::path::Path;

use crate::container::{read_uleb128, write_uleb128};
use crate::error::{Error, Result};
use crate::registry::{read_entry, write_entry, Entry, Registry, RegistryKind, RegistrySet};

pub const MODE_EMBEDDED: u8 = 0x00;
pub const MODE_EXTERNAL: u8 = 0x01;
pub const MODE_HYBRID: u8 = 0x02;

/// A decoded DICT chunk payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictPayload {
    Embedded {
        kind: RegistryKind,
        entries: Vec<Entry>,
    },
    External {
        kind: RegistryKind,
        version: u16,
        filename: String,
    },
    Hybrid {
        kind: RegistryKind,
        version: u16,
        filename: String,
        overrides: Vec<Entry>,
    },
}

impl DictPayload {
    pub fn kind(&self) -> RegistryKind {
        match self {
            DictPayload::Embedded { kind, .. }
            | DictPayload::External { kind, .. }
            | DictPayload::Hybrid { kind, .. } => *kind,
        }
    }

    /// Serialize into a DICT chunk payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![self.kind().code()];
        match self {
            DictPayload::Embedded { entries, .. } => {
                out.push(MODE_EMBEDDED);
                write_uleb128(&mut out, entries.len() as u32);
                for entry in entries {
                    write_entry(&mut out, entry);
                }
            }
            DictPayload::External {
                version, filename, ..
            } => {
                out.push(MODE_EXTERNAL);
                write_external(&mut out, *version, filename);
            }
            DictPayload::Hybrid {
                version,
                filename,
                overrides,
                ..
            } => {
                out.push(MODE_HYBRID);
                write_external(&mut out, *version, filename);
                write_uleb128(&mut out, overrides.len() as u32);
                for entry in overrides {
                    write_entry(&mut out, entry);
                }
            }
        }
        out
    }

    /// Parse a DICT chunk payload.
    pub fn parse(data: &[u8]) -> Result<DictPayload> {
        if data.len() < 2 {
            return Err(Error::Registry("DICT payload too short".into()));
        }
        let kind = RegistryKind::from_code(data[0]).ok_or_else(|| {
            Error::Registry(format!("unknown DICT registry type 0x{:02X}", data[0]))
        })?;
        let mode = data[1];
        let mut pos = 2;

        match mode {
            MODE_EMBEDDED => {
                let entries = read_entries(kind, data, &mut pos)?;
                expect_consumed(data, pos)?;
                Ok(DictPayload::Embedded { kind, entries })
            }
            MODE_EXTERNAL => {
                let (version, filename) = read_external(data, &mut pos)?;
                expect_consumed(data, pos)?;
                Ok(DictPayload::External {
                    kind,
                    version,
                    filename,
                })
            }
            MODE_HYBRID => {
                let (version, filename) = read_external(data, &mut pos)?;
                let overrides = read_entries(kind, data, &mut pos)?;
                expect_consumed(data, pos)?;
                Ok(DictPayload::Hybrid {
                    kind,
                    version,
                    filename,
                    overrides,
                })
            }
            other => Err(Error::Registry(format!(
                "unknown DICT mode 0x{:02X}",
                other
            ))),
        }
    }

    /// Fold this DICT's entries into a registry set.
    ///
    /// External references are loaded relative to `base_dir`; a missing file
    /// is a hard error, never a silently dropped annotation.
    pub fn resolve(&self, set: &mut RegistrySet, base_dir: Option<&Path>) -> Result<()> {
        match self {
            DictPayload::Embedded { kind, entries } => {
                apply_overrides(set.registry_mut(*kind), entries);
                Ok(())
            }
            DictPayload::External { kind, filename, .. } => {
                load_external(set, *kind, filename, base_dir)
            }
            DictPayload::Hybrid {
                kind,
                filename,
                overrides,
                ..
            } => {
                load_external(set, *kind, filename, base_dir)?;
                apply_overrides(set.registry_mut(*kind), overrides);
                Ok(())
            }
        }
    }
}

fn write_external(out: &mut Vec<u8>, version: u16, filename: &str) {
    out.extend_from_slice(&version.to_le_bytes());
    write_uleb128(out, filename.len() as u32);
    out.extend_from_slice(filename.as_bytes());
}

fn read_external(data: &[u8], pos: &mut usize) -> Result<(u16, String)> {
    if *pos + 2 > data.len() {
        return Err(Error::Registry("DICT external block truncated".into()));
    }
    let version = u16::from_le_bytes([data[*pos], data[*pos + 1]]);
    *pos += 2;
    let (len, n) = read_uleb128(data, *pos)
        .map_err(|_| Error::Registry("DICT external filename length malformed".into()))?;
    *pos += n;
    let len = len as usize;
    if *pos + len > data.len() {
        return Err(Error::Registry("DICT external filename truncated".into()));
    }
    let filename = std::str::from_utf8(&data[*pos..*pos + len])
        .map_err(|_| Error::Registry("DICT external filename is not valid UTF-8".into()))?
        .to_string();
    *pos += len;
    Ok((version, filename))
}

fn read_entries(kind: RegistryKind, data: &[u8], pos: &mut usize) -> Result<Vec<Entry>> {
    let (count, n) = read_uleb128(data, *pos)
        .map_err(|_| Error::Registry("DICT entry count malformed".into()))?;
    *pos += n;
    let mut entries = Vec::with_capacity(count as usize);
    for i in 0..count {
        if *pos >= data.len() {
            return Err(Error::Registry(format!(
                "DICT declares {} entries but payload ends after {}",
                count, i
            )));
        }
        let (entry, consumed) = read_entry(kind, data, *pos)?;
        *pos += consumed;
        entries.push(entry);
    }
    Ok(entries)
}

fn expect_consumed(data: &[u8], pos: usize) -> Result<()> {
    if pos != data.len() {
        return Err(Error::Registry(format!(
            "DICT payload has {} trailing bytes",
            data.len() - pos
        )));
    }
    Ok(())
}

fn apply_overrides(registry: &mut Registry, entries: &[Entry]) {
    for entry in entries {
        registry.apply_override(entry.clone());
    }
}

fn load_external(
    set: &mut RegistrySet,
    kind: RegistryKind,
    filename: &str,
    base_dir: Option<&Path>,
) -> Result<()> {
    let path = match base_dir {
        Some(dir) => dir.join(filename),
        None => Path::new(filename).to_path_buf(),
    };
    let data = std::fs::read(&path).map_err(|_| {
        Error::Registry(format!(
            "external {} registry '{}' is unavailable",
            kind.name(),
            filename
        ))
    })?;
    let external = Registry::parse(&data)?;
    if external.kind != kind {
        return Err(Error::Registry(format!(
            "external registry '{}' is a {} registry, DICT declares {}",
            filename,
            external.kind.name(),
            kind.name()
        )));
    }
    let registry = set.registry_mut(kind);
    for entry in external.iter() {
        registry.apply_override(entry.clone());
    }
    Ok(())
}
