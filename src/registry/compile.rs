//! TSV → registry compiler.
//!
//! The TSV files are the authoring format: tab-separated columns, `#`
//! comments, blank lines ignored. Symbolic column values (pada letters,
//! liṅga masks, stem classes) keep the tables reviewable; the compiler packs
//! them into the binary metadata fields.

use super::{gana_id_range, Entry, EntryMeta, Registry, RegistryKind, DHATU_EXTENSION_MIN};
use crate::error::{Error, Result};

/// Compile TSV text into a registry.
pub fn compile_tsv(kind: RegistryKind, text: &str) -> Result<Registry> {
    let mut registry = Registry::new(kind, 1);

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry = parse_line(kind, line).map_err(|e| {
            Error::Registry(format!("{} line {}: {}", kind.name(), lineno + 1, e))
        })?;
        registry.insert(entry)?;
    }

    Ok(registry)
}

fn parse_line(kind: RegistryKind, line: &str) -> std::result::Result<Entry, String> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    let expect = |n: usize| -> std::result::Result<(), String> {
        if fields.len() != n {
            Err(format!("expected {} columns, found {}", n, fields.len()))
        } else {
            Ok(())
        }
    };

    let id: u32 = fields
        .first()
        .ok_or("missing id column")?
        .parse()
        .map_err(|_| format!("bad id '{}'", fields[0]))?;
    let iast = fields.get(1).ok_or("missing iast column")?.to_string();

    let meta = match kind {
        RegistryKind::Dhatu => {
            expect(7)?;
            let gana: u8 = fields[2]
                .parse()
                .map_err(|_| format!("bad gaṇa '{}'", fields[2]))?;
            let (lo, hi) = gana_id_range(gana).ok_or(format!("gaṇa {} out of range", gana))?;
            if id < DHATU_EXTENSION_MIN && !(lo..=hi).contains(&id) {
                return Err(format!(
                    "standard id {} is outside gaṇa {}'s range {}–{}",
                    id, gana, lo, hi
                ));
            }
            let pada = match fields[3] {
                "P" => 1,
                "A" => 2,
                "U" => 3,
                other => return Err(format!("bad pada '{}'", other)),
            };
            let karma = match fields[4] {
                "sak" => 1,
                "ak" => 2,
                "dvi" => 3,
                other => return Err(format!("bad karma '{}'", other)),
            };
            let it_flags = parse_byte(fields[5])?;
            let set_flags = match fields[6] {
                "set" => 1,
                "anit" => 2,
                "vet" => 3,
                other => return Err(format!("bad seṭ class '{}'", other)),
            };
            EntryMeta::Dhatu {
                gana,
                pada,
                karma,
                it_flags,
                set_flags,
            }
        }
        RegistryKind::Pratipadika => {
            expect(5)?;
            let stem_class = match fields[2] {
                "a" => 1,
                "ā" => 2,
                "i" => 3,
                "ī" => 4,
                "u" => 5,
                "ū" => 6,
                "ṛ" => 7,
                "hal" => 8,
                other => return Err(format!("bad stem class '{}'", other)),
            };
            let mut linga = 0u8;
            for c in fields[3].chars() {
                linga |= match c {
                    'm' => 0b001,
                    'f' => 0b010,
                    'n' => 0b100,
                    other => return Err(format!("bad liṅga letter '{}'", other)),
                };
            }
            if linga == 0 {
                return Err("empty liṅga".into());
            }
            let flags = parse_byte(fields[4])?;
            EntryMeta::Pratipadika {
                stem_class,
                linga,
                flags,
            }
        }
        RegistryKind::Sandhi => {
            expect(4)?;
            let rule_type = match fields[2] {
                "ac" => 1,
                "hal" => 2,
                "visarga" => 3,
                "prakrti" => 4,
                other => return Err(format!("bad rule type '{}'", other)),
            };
            EntryMeta::Sandhi {
                rule_type,
                sutra: fields[3].to_string(),
            }
        }
    };

    Ok(Entry { id, iast, meta })
}

fn parse_byte(s: &str) -> std::result::Result<u8, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("bad flag byte '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_dhatu_line() {
        let registry =
            compile_tsv(RegistryKind::Dhatu, "1\tbhū\t1\tP\tak\t0x00\tset\n").unwrap();
        let entry = registry.get(1).unwrap();
        assert_eq!(entry.iast, "bhū");
        match entry.meta {
            EntryMeta::Dhatu {
                gana,
                pada,
                karma,
                set_flags,
                ..
            } => {
                assert_eq!(gana, 1);
                assert_eq!(pada, 1);
                assert_eq!(karma, 2);
                assert_eq!(set_flags, 1);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_comments_and_blanks_are_skipped() {
        let text = "# heading\n\n1\tdeva\ta\tm\t0x00\n# tail\n";
        let registry = compile_tsv(RegistryKind::Pratipadika, text).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_multi_gender_linga_mask() {
        let registry =
            compile_tsv(RegistryKind::Pratipadika, "1\tx\ta\tmn\t0x00\n").unwrap();
        match registry.get(1).unwrap().meta {
            EntryMeta::Pratipadika { linga, .. } => assert_eq!(linga, 0b101),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_standard_id_must_match_gana_range() {
        // id 50 declared gaṇa 2 (range 201–400)
        let err = compile_tsv(RegistryKind::Dhatu, "50\tx\t2\tP\tsak\t0\tset\n").unwrap_err();
        assert!(err.to_string().contains("range"));
    }

    #[test]
    fn test_extension_ids_are_exempt_from_gana_ranges() {
        let registry =
            compile_tsv(RegistryKind::Dhatu, "2048\tnand\t1\tP\tak\t0\tset\n").unwrap();
        assert!(registry.get(2048).is_some());
    }

    #[test]
    fn test_duplicate_id_is_an_error() {
        let text = "1\tdeva\ta\tm\t0\n1\tnara\ta\tm\t0\n";
        assert!(compile_tsv(RegistryKind::Pratipadika, text).is_err());
    }

    #[test]
    fn test_error_reports_line_number() {
        let err = compile_tsv(RegistryKind::Sandhi, "\n\nnot-a-line\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
