//! Registries: dhātu, prātipadika, and sandhi-rule tables.
//!
//! Source of truth is TSV (see [`compile`]); the wire form is a 12-byte
//! header (magic · version u16 LE · entry count u32 LE · reserved 0x0000)
//! followed by packed entries `[ULEB id][ULEB iast-len][iast][metadata]`.
//! Registries are append-only: ids are never reassigned, and merging an
//! extension whose id already exists is a fatal error.

pub mod builtin;
pub mod compile;

use std::collections::BTreeMap;

use crate::container::{read_uleb128, write_uleb128};
use crate::error::{Error, Result};

/// Dhātu extension ids start here; 1–1999 belong to the standard registry.
pub const DHATU_EXTENSION_MIN: u32 = 2000;

/// The three registry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Dhatu,
    Pratipadika,
    Sandhi,
}

impl RegistryKind {
    pub fn magic(self) -> &'static [u8; 4] {
        match self {
            RegistryKind::Dhatu => b"SPDR",
            RegistryKind::Pratipadika => b"SPPR",
            RegistryKind::Sandhi => b"SPSR",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            RegistryKind::Dhatu => "sldr",
            RegistryKind::Pratipadika => "slpr",
            RegistryKind::Sandhi => "slsr",
        }
    }

    /// The registry-type byte used in DICT chunk payloads.
    pub fn code(self) -> u8 {
        match self {
            RegistryKind::Dhatu => 0x01,
            RegistryKind::Pratipadika => 0x02,
            RegistryKind::Sandhi => 0x03,
        }
    }

    pub fn from_code(code: u8) -> Option<RegistryKind> {
        match code {
            0x01 => Some(RegistryKind::Dhatu),
            0x02 => Some(RegistryKind::Pratipadika),
            0x03 => Some(RegistryKind::Sandhi),
            _ => None,
        }
    }

    pub fn from_magic(magic: &[u8]) -> Option<RegistryKind> {
        match magic {
            b"SPDR" => Some(RegistryKind::Dhatu),
            b"SPPR" => Some(RegistryKind::Pratipadika),
            b"SPSR" => Some(RegistryKind::Sandhi),
            _ => None,
        }
    }

    /// Parse a CLI kind name.
    pub fn parse(name: &str) -> Option<RegistryKind> {
        match name {
            "dhatu" => Some(RegistryKind::Dhatu),
            "pratipadika" => Some(RegistryKind::Pratipadika),
            "sandhi" => Some(RegistryKind::Sandhi),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RegistryKind::Dhatu => "dhatu",
            RegistryKind::Pratipadika => "pratipadika",
            RegistryKind::Sandhi => "sandhi",
        }
    }
}

/// Type-specific entry metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryMeta {
    /// `GAṆA(4) | PADA(2) | KARMA(2)`, then IT flags, then SET flags.
    Dhatu {
        gana: u8,
        pada: u8,
        karma: u8,
        it_flags: u8,
        set_flags: u8,
    },
    /// `STEM_CLASS(4) | LIṄGA(3) | rsv(1)`, then FLAGS.
    Pratipadika { stem_class: u8, linga: u8, flags: u8 },
    /// `TYPE(4) | rsv(4)`, then a length-prefixed sūtra reference.
    Sandhi { rule_type: u8, sutra: String },
}

impl EntryMeta {
    fn kind(&self) -> RegistryKind {
        match self {
            EntryMeta::Dhatu { .. } => RegistryKind::Dhatu,
            EntryMeta::Pratipadika { .. } => RegistryKind::Pratipadika,
            EntryMeta::Sandhi { .. } => RegistryKind::Sandhi,
        }
    }
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: u32,
    pub iast: String,
    pub meta: EntryMeta,
}

/// Serialize one packed entry.
pub fn write_entry(out: &mut Vec<u8>, entry: &Entry) {
    write_uleb128(out, entry.id);
    write_uleb128(out, entry.iast.len() as u32);
    out.extend_from_slice(entry.iast.as_bytes());
    match &entry.meta {
        EntryMeta::Dhatu {
            gana,
            pada,
            karma,
            it_flags,
            set_flags,
        } => {
            out.push((gana << 4) | ((pada & 0x03) << 2) | (karma & 0x03));
            out.push(*it_flags);
            out.push(*set_flags);
        }
        EntryMeta::Pratipadika {
            stem_class,
            linga,
            flags,
        } => {
            out.push((stem_class << 4) | ((linga & 0x07) << 1));
            out.push(*flags);
        }
        EntryMeta::Sandhi { rule_type, sutra } => {
            out.push(rule_type << 4);
            write_uleb128(out, sutra.len() as u32);
            out.extend_from_slice(sutra.as_bytes());
        }
    }
}

/// Parse one packed entry at `pos`. Returns the entry and bytes consumed.
pub fn read_entry(kind: RegistryKind, data: &[u8], pos: usize) -> Result<(Entry, usize)> {
    let start = pos;
    let (id, n) = read_uleb128(data, pos).map_err(entry_err(kind, pos))?;
    let mut pos = pos + n;

    let (iast_len, n) = read_uleb128(data, pos).map_err(entry_err(kind, pos))?;
    pos += n;
    let iast_len = iast_len as usize;
    if pos + iast_len > data.len() {
        return Err(Error::Registry(format!(
            "{} entry {}: iast field extends beyond data",
            kind.name(),
            id
        )));
    }
    let iast = std::str::from_utf8(&data[pos..pos + iast_len])
        .map_err(|_| {
            Error::Registry(format!("{} entry {}: iast is not valid UTF-8", kind.name(), id))
        })?
        .to_string();
    pos += iast_len;

    let need = |pos: usize, count: usize| -> Result<()> {
        if pos + count > data.len() {
            Err(Error::Registry(format!(
                "{} entry {}: truncated metadata",
                kind.name(),
                id
            )))
        } else {
            Ok(())
        }
    };

    let meta = match kind {
        RegistryKind::Dhatu => {
            need(pos, 3)?;
            let packed = data[pos];
            let meta = EntryMeta::Dhatu {
                gana: packed >> 4,
                pada: (packed >> 2) & 0x03,
                karma: packed & 0x03,
                it_flags: data[pos + 1],
                set_flags: data[pos + 2],
            };
            pos += 3;
            meta
        }
        RegistryKind::Pratipadika => {
            need(pos, 2)?;
            let packed = data[pos];
            if packed & 0x01 != 0 {
                return Err(Error::Registry(format!(
                    "pratipadika entry {}: reserved metadata bit set",
                    id
                )));
            }
            let meta = EntryMeta::Pratipadika {
                stem_class: packed >> 4,
                linga: (packed >> 1) & 0x07,
                flags: data[pos + 1],
            };
            pos += 2;
            meta
        }
        RegistryKind::Sandhi => {
            need(pos, 1)?;
            let packed = data[pos];
            if packed & 0x0F != 0 {
                return Err(Error::Registry(format!(
                    "sandhi entry {}: reserved metadata bits set",
                    id
                )));
            }
            pos += 1;
            let (sutra_len, n) = read_uleb128(data, pos).map_err(entry_err(kind, pos))?;
            pos += n;
            let sutra_len = sutra_len as usize;
            need(pos, sutra_len)?;
            let sutra = std::str::from_utf8(&data[pos..pos + sutra_len])
                .map_err(|_| {
                    Error::Registry(format!("sandhi entry {}: sūtra is not valid UTF-8", id))
                })?
                .to_string();
            pos += sutra_len;
            EntryMeta::Sandhi {
                rule_type: packed >> 4,
                sutra,
            }
        }
    };

    Ok((Entry { id, iast, meta }, pos - start))
}

fn entry_err(kind: RegistryKind, pos: usize) -> impl Fn(Error) -> Error {
    move |_| {
        Error::Registry(format!(
            "{} registry: malformed entry framing at byte {}",
            kind.name(),
            pos
        ))
    }
}

/// An in-memory registry table, keyed by id.
#[derive(Debug, Clone)]
pub struct Registry {
    pub kind: RegistryKind,
    pub version: u16,
    entries: BTreeMap<u32, Entry>,
}

impl Registry {
    pub fn new(kind: RegistryKind, version: u16) -> Registry {
        Registry {
            kind,
            version,
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn lookup_iast(&self, iast: &str) -> Option<&Entry> {
        self.entries.values().find(|e| e.iast == iast)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Insert during authoring (TSV compile). Duplicate ids are an error.
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        if entry.meta.kind() != self.kind {
            return Err(Error::Registry(format!(
                "entry {} has {} metadata, registry is {}",
                entry.id,
                entry.meta.kind().name(),
                self.kind.name()
            )));
        }
        if self.entries.contains_key(&entry.id) {
            return Err(Error::Registry(format!(
                "duplicate id {} in {} registry",
                entry.id,
                self.kind.name()
            )));
        }
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    /// Insert-or-replace, for DICT resolution precedence (builtin < external
    /// < embedded). Not used for extension merging, which is collision-fatal.
    pub fn apply_override(&mut self, entry: Entry) {
        self.entries.insert(entry.id, entry);
    }

    /// Merge an extension registry. Any id already present is a fatal
    /// collision, regardless of payload equality; dhātu extensions must keep
    /// out of the reserved standard range.
    pub fn merge_extension(&mut self, ext: Registry) -> Result<()> {
        if ext.kind != self.kind {
            return Err(Error::Registry(format!(
                "cannot merge a {} registry into a {} registry",
                ext.kind.name(),
                self.kind.name()
            )));
        }
        for entry in ext.entries.into_values() {
            if self.kind == RegistryKind::Dhatu && entry.id < DHATU_EXTENSION_MIN {
                return Err(Error::Registry(format!(
                    "extension dhātu id {} lies inside the reserved range 1–{}",
                    entry.id,
                    DHATU_EXTENSION_MIN - 1
                )));
            }
            if self.entries.contains_key(&entry.id) {
                return Err(Error::Registry(format!(
                    "id collision on extension merge: {} already exists in the {} registry",
                    entry.id,
                    self.kind.name()
                )));
            }
            self.entries.insert(entry.id, entry);
        }
        Ok(())
    }

    /// Serialize to the binary wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(self.kind.magic());
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0x00, 0x00]);
        for entry in self.entries.values() {
            write_entry(&mut out, entry);
        }
        out
    }

    /// Parse the binary wire form. The declared entry count must match the
    /// body exactly: a short body or trailing bytes are both rejected.
    pub fn parse(data: &[u8]) -> Result<Registry> {
        if data.len() < 12 {
            return Err(Error::Registry("file too short for registry header".into()));
        }
        let kind = RegistryKind::from_magic(&data[0..4]).ok_or_else(|| {
            Error::Registry("bad registry magic (expected SPDR/SPPR/SPSR)".into())
        })?;
        let version = u16::from_le_bytes([data[4], data[5]]);
        let count = u32::from_le_bytes([data[6], data[7], data[8], data[9]]);
        if data[10] != 0 || data[11] != 0 {
            return Err(Error::Registry("reserved header bytes must be zero".into()));
        }

        let mut registry = Registry::new(kind, version);
        let mut pos = 12;
        for i in 0..count {
            if pos >= data.len() {
                return Err(Error::Registry(format!(
                    "{} registry declares {} entries but body ends after {}",
                    kind.name(),
                    count,
                    i
                )));
            }
            let (entry, consumed) = read_entry(kind, data, pos)?;
            pos += consumed;
            registry.insert(entry)?;
        }
        if pos != data.len() {
            return Err(Error::Registry(format!(
                "{} registry has {} trailing bytes after the last entry",
                kind.name(),
                data.len() - pos
            )));
        }
        Ok(registry)
    }
}

/// Standard-range id allocation: gaṇa `g` owns (g−1)·200+1 … g·200, capped
/// at 1999 for gaṇa 10.
pub fn gana_id_range(gana: u8) -> Option<(u32, u32)> {
    if !(1..=10).contains(&gana) {
        return None;
    }
    let start = (gana as u32 - 1) * 200 + 1;
    let end = (gana as u32 * 200).min(DHATU_EXTENSION_MIN - 1);
    Some((start, end))
}

/// The three registries of a codec session, builtins merged with any loaded
/// extensions. Immutable once decoding begins.
#[derive(Debug, Clone)]
pub struct RegistrySet {
    pub dhatu: Registry,
    pub pratipadika: Registry,
    pub sandhi: Registry,
}

impl RegistrySet {
    /// The builtin bootstrap tables.
    pub fn builtin() -> RegistrySet {
        RegistrySet {
            dhatu: builtin::dhatu().clone(),
            pratipadika: builtin::pratipadika().clone(),
            sandhi: builtin::sandhi().clone(),
        }
    }

    pub fn registry(&self, kind: RegistryKind) -> &Registry {
        match kind {
            RegistryKind::Dhatu => &self.dhatu,
            RegistryKind::Pratipadika => &self.pratipadika,
            RegistryKind::Sandhi => &self.sandhi,
        }
    }

    pub fn registry_mut(&mut self, kind: RegistryKind) -> &mut Registry {
        match kind {
            RegistryKind::Dhatu => &mut self.dhatu,
            RegistryKind::Pratipadika => &mut self.pratipadika,
            RegistryKind::Sandhi => &mut self.sandhi,
        }
    }

    /// Load an extension registry file and merge it (collision-fatal).
    pub fn load_extension(&mut self, path: &std::path::Path) -> Result<()> {
        let data = std::fs::read(path)?;
        let ext = Registry::parse(&data)?;
        self.registry_mut(ext.kind).merge_extension(ext)
    }

    pub fn resolve(&self, kind: RegistryKind, id: u32) -> Option<&Entry> {
        self.registry(kind).get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dhatu(id: u32, iast: &str) -> Entry {
        Entry {
            id,
            iast: iast.into(),
            meta: EntryMeta::Dhatu {
                gana: 1,
                pada: 1,
                karma: 2,
                it_flags: 0,
                set_flags: 1,
            },
        }
    }

    #[test]
    fn test_binary_roundtrip() {
        let mut registry = Registry::new(RegistryKind::Dhatu, 1);
        registry.insert(sample_dhatu(1, "bhū")).unwrap();
        registry.insert(sample_dhatu(2, "gam")).unwrap();

        let bytes = registry.to_bytes();
        assert_eq!(&bytes[0..4], b"SPDR");
        let parsed = Registry::parse(&bytes).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(1).unwrap().iast, "bhū");
    }

    #[test]
    fn test_sandhi_entry_roundtrip() {
        let mut registry = Registry::new(RegistryKind::Sandhi, 1);
        registry
            .insert(Entry {
                id: 6,
                iast: "jaśtva".into(),
                meta: EntryMeta::Sandhi {
                    rule_type: 2,
                    sutra: "8.2.39".into(),
                },
            })
            .unwrap();
        let parsed = Registry::parse(&registry.to_bytes()).unwrap();
        match &parsed.get(6).unwrap().meta {
            EntryMeta::Sandhi { rule_type, sutra } => {
                assert_eq!(*rule_type, 2);
                assert_eq!(sutra, "8.2.39");
            }
            other => panic!("wrong meta: {:?}", other),
        }
    }

    #[test]
    fn test_short_body_is_rejected() {
        let mut registry = Registry::new(RegistryKind::Dhatu, 1);
        registry.insert(sample_dhatu(1, "bhū")).unwrap();
        registry.insert(sample_dhatu(2, "gam")).unwrap();
        let mut bytes = registry.to_bytes();
        // drop the last entry's bytes but keep the declared count of 2
        bytes.truncate(bytes.len() - 8);
        let err = Registry::parse(&bytes).unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let mut registry = Registry::new(RegistryKind::Dhatu, 1);
        registry.insert(sample_dhatu(1, "bhū")).unwrap();
        let mut bytes = registry.to_bytes();
        bytes.push(0x00);
        assert!(Registry::parse(&bytes).is_err());
    }

    #[test]
    fn test_extension_collision_is_fatal() {
        let mut base = Registry::new(RegistryKind::Dhatu, 1);
        base.insert(sample_dhatu(2000, "nand")).unwrap();

        let mut ext = Registry::new(RegistryKind::Dhatu, 1);
        // identical payload does not make a collision acceptable
        ext.insert(sample_dhatu(2000, "nand")).unwrap();
        assert!(base.merge_extension(ext).is_err());
    }

    #[test]
    fn test_extension_must_stay_out_of_reserved_range() {
        let mut base = Registry::new(RegistryKind::Dhatu, 1);
        let mut ext = Registry::new(RegistryKind::Dhatu, 1);
        ext.insert(sample_dhatu(42, "x")).unwrap();
        let err = base.merge_extension(ext).unwrap_err();
        assert!(err.to_string().contains("reserved range"));
    }

    #[test]
    fn test_gana_ranges_partition_the_standard_space() {
        assert_eq!(gana_id_range(1), Some((1, 200)));
        assert_eq!(gana_id_range(9), Some((1601, 1800)));
        assert_eq!(gana_id_range(10), Some((1801, 1999)));
        assert_eq!(gana_id_range(0), None);
        assert_eq!(gana_id_range(11), None);
    }

    #[test]
    fn test_override_replaces() {
        let mut registry = Registry::new(RegistryKind::Dhatu, 1);
        registry.insert(sample_dhatu(1, "bhū")).unwrap();
        registry.apply_override(sample_dhatu(1, "bhuvi"));
        assert_eq!(registry.get(1).unwrap().iast, "bhuvi");
    }
}
