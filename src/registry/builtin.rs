//! Builtin bootstrap registries, compiled once from the embedded TSV tables.

use std::sync::OnceLock;

use super::{compile::compile_tsv, Registry, RegistryKind};

static DHATU: OnceLock<Registry> = OnceLock::new();
static PRATIPADIKA: OnceLock<Registry> = OnceLock::new();
static SANDHI: OnceLock<Registry> = OnceLock::new();

/// The builtin dhātu table.
pub fn dhatu() -> &'static Registry {
    DHATU.get_or_init(|| {
        compile_tsv(RegistryKind::Dhatu, include_str!("../../registries/dhatu.tsv"))
            .expect("builtin dhātu table is well-formed")
    })
}

/// The builtin prātipadika table.
pub fn pratipadika() -> &'static Registry {
    PRATIPADIKA.get_or_init(|| {
        compile_tsv(
            RegistryKind::Pratipadika,
            include_str!("../../registries/pratipadika.tsv"),
        )
        .expect("builtin prātipadika table is well-formed")
    })
}

/// The builtin sandhi-rule table.
pub fn sandhi() -> &'static Registry {
    SANDHI.get_or_init(|| {
        compile_tsv(RegistryKind::Sandhi, include_str!("../../registries/sandhi.tsv"))
            .expect("builtin sandhi table is well-formed")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{gana_id_range, EntryMeta};

    #[test]
    fn test_builtins_load() {
        assert!(dhatu().len() >= 20);
        assert!(pratipadika().len() >= 10);
        assert!(sandhi().len() >= 8);
    }

    #[test]
    fn test_bhu_is_entry_one() {
        let entry = dhatu().get(1).unwrap();
        assert_eq!(entry.iast, "bhū");
    }

    #[test]
    fn test_all_builtin_dhatus_sit_in_their_gana_range() {
        for entry in dhatu().iter() {
            let gana = match entry.meta {
                EntryMeta::Dhatu { gana, .. } => gana,
                _ => unreachable!(),
            };
            let (lo, hi) = gana_id_range(gana).unwrap();
            assert!(
                (lo..=hi).contains(&entry.id),
                "dhātu {} (id {}) outside gaṇa {} range",
                entry.iast,
                entry.id,
                gana
            );
        }
    }

    #[test]
    fn test_sandhi_rules_carry_sutra_refs() {
        for entry in sandhi().iter() {
            match &entry.meta {
                EntryMeta::Sandhi { sutra, .. } => assert!(!sutra.is_empty()),
                _ => unreachable!(),
            }
        }
    }
}
