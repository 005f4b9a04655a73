use std::fs;
use std::path::PathBuf;

use slbc::registry::{compile::compile_tsv, Entry, EntryMeta, Registry};
use slbc::{Error, RegistryKind, RegistrySet, Result};

use crate::cli::args::RegistryAction;
use crate::cli::global::GlobalArgs;

pub fn handle(
    action: RegistryAction,
    global: &GlobalArgs,
    registries: &RegistrySet,
) -> Result<()> {
    match action {
        RegistryAction::Compile {
            kind,
            input,
            output,
        } => compile(&kind, &input, output, global),
        RegistryAction::Inspect { file } => inspect(&file),
        RegistryAction::Lookup { kind, query, file } => lookup(&kind, &query, file, registries),
        RegistryAction::Stats { file } => stats(file, registries),
    }
}

fn parse_kind(name: &str) -> Result<RegistryKind> {
    RegistryKind::parse(name).ok_or_else(|| Error::Input {
        token: name.to_string(),
        position: 0,
    })
}

fn compile(
    kind: &str,
    input: &PathBuf,
    output: Option<PathBuf>,
    global: &GlobalArgs,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let text = fs::read_to_string(input)?;
    let registry = compile_tsv(kind, &text)?;

    let path = output.unwrap_or_else(|| input.with_extension(kind.file_extension()));
    let bytes = registry.to_bytes();
    fs::write(&path, &bytes)?;
    if !global.quiet {
        eprintln!(
            "compiled {} entries ({} bytes) to {}",
            registry.len(),
            bytes.len(),
            path.display()
        );
    }
    Ok(())
}

fn inspect(file: &PathBuf) -> Result<()> {
    let registry = Registry::parse(&fs::read(file)?)?;
    println!(
        "{} registry, version {}, {} entries",
        registry.kind.name(),
        registry.version,
        registry.len()
    );
    for entry in registry.iter() {
        println!("  {:>6}  {:<12} {}", entry.id, entry.iast, describe(entry));
    }
    Ok(())
}

fn lookup(
    kind: &str,
    query: &str,
    file: Option<PathBuf>,
    registries: &RegistrySet,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let from_file;
    let registry = match file {
        Some(path) => {
            from_file = Registry::parse(&fs::read(path)?)?;
            if from_file.kind != kind {
                return Err(Error::Registry(format!(
                    "file holds a {} registry, not {}",
                    from_file.kind.name(),
                    kind.name()
                )));
            }
            &from_file
        }
        None => registries.registry(kind),
    };

    let entry = match query.parse::<u32>() {
        Ok(id) => registry.get(id),
        Err(_) => registry.lookup_iast(query),
    };

    match entry {
        Some(entry) => {
            println!("{:>6}  {:<12} {}", entry.id, entry.iast, describe(entry));
            Ok(())
        }
        None => Err(Error::Input {
            token: format!("{} (no such {} entry)", query, kind.name()),
            position: 0,
        }),
    }
}

fn stats(file: Option<PathBuf>, registries: &RegistrySet) -> Result<()> {
    match file {
        Some(path) => {
            let registry = Registry::parse(&fs::read(path)?)?;
            print_stats(&registry);
        }
        None => {
            print_stats(&registries.dhatu);
            print_stats(&registries.pratipadika);
            print_stats(&registries.sandhi);
        }
    }
    Ok(())
}

fn print_stats(registry: &Registry) {
    println!(
        "{}: {} entries (version {})",
        registry.kind.name(),
        registry.len(),
        registry.version
    );
    if registry.kind == RegistryKind::Dhatu {
        let mut per_gana = [0usize; 11];
        for entry in registry.iter() {
            if let EntryMeta::Dhatu { gana, .. } = entry.meta {
                if (1..=10).contains(&gana) {
                    per_gana[gana as usize] += 1;
                }
            }
        }
        for (gana, count) in per_gana.iter().enumerate().skip(1) {
            if *count > 0 {
                println!("  gaṇa {:>2}: {}", gana, count);
            }
        }
    }
}

fn describe(entry: &Entry) -> String {
    match &entry.meta {
        EntryMeta::Dhatu {
            gana,
            pada,
            karma,
            it_flags,
            set_flags,
        } => {
            let pada = match pada {
                1 => "P",
                2 => "A",
                3 => "U",
                _ => "?",
            };
            let karma = match karma {
                1 => "sak",
                2 => "ak",
                3 => "dvi",
                _ => "?",
            };
            let set = match set_flags {
                1 => "seṭ",
                2 => "aniṭ",
                3 => "veṭ",
                _ => "?",
            };
            format!(
                "gaṇa {} · {} · {} · {} · it 0x{:02X}",
                gana, pada, karma, set, it_flags
            )
        }
        EntryMeta::Pratipadika {
            stem_class,
            linga,
            flags,
        } => {
            let stem = match stem_class {
                1 => "a",
                2 => "ā",
                3 => "i",
                4 => "ī",
                5 => "u",
                6 => "ū",
                7 => "ṛ",
                8 => "hal",
                _ => "?",
            };
            let mut linga_str = String::new();
            if linga & 0b001 != 0 {
                linga_str.push('m');
            }
            if linga & 0b010 != 0 {
                linga_str.push('f');
            }
            if linga & 0b100 != 0 {
                linga_str.push('n');
            }
            format!("{}-stem · {} · flags 0x{:02X}", stem, linga_str, flags)
        }
        EntryMeta::Sandhi { rule_type, sutra } => {
            let rule = match rule_type {
                1 => "ac",
                2 => "hal",
                3 => "visarga",
                4 => "prakṛtibhāva",
                _ => "?",
            };
            format!("{} sandhi · sūtra {}", rule, sutra)
        }
    }
}
