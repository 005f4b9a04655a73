//! Byte introspection: explain what any stream byte represents.

use std::fmt;

use crate::bytes::{
    self, accent, classify, column, grade, place, quantity, series, ByteClass,
};
use crate::error::{Error, Result};
use crate::tables;

/// A human-readable description of one byte.
#[derive(Debug)]
pub struct ByteReport {
    pub byte: u8,
    pub class: ByteClass,
    pub label: String,
    pub fields: Vec<(&'static str, String)>,
}

/// Describe a byte.
pub fn report(b: u8) -> ByteReport {
    match classify(b) {
        ByteClass::Svara => svara_report(b),
        ByteClass::Vyanjana => vyanjana_report(b),
        ByteClass::BhashaControl => control_report(b, true),
        ByteClass::LipiControl => control_report(b, false),
        ByteClass::Reserved => ByteReport {
            byte: b,
            class: ByteClass::Reserved,
            label: format!("reserved (PLACE={}, COLUMN=101)", place(b)),
            fields: Vec::new(),
        },
    }
}

fn svara_report(b: u8) -> ByteReport {
    let q = match quantity(b) {
        0b01 => "hrasva",
        0b10 => "dīrgha",
        0b11 => "pluta",
        _ => "?",
    };
    let a = match accent(b) {
        0b00 => "neutral",
        0b01 => "udātta",
        0b10 => "anudātta",
        _ => "svarita",
    };
    let s = ["A", "I", "U", "Ṛ"][series(b) as usize];
    let g = ["śuddha", "guṇa", "vṛddhi", "special"][grade(b) as usize];
    let iast = tables::svara_iast(b).unwrap_or_else(|| "?".into());

    ByteReport {
        byte: b,
        class: ByteClass::Svara,
        label: format!("svara '{}' ({}, {}, {}-series, {})", iast, q, a, s, g),
        fields: vec![
            ("Q (quantity)", format!("{:02b} = {}", quantity(b), q)),
            ("A (accent)", format!("{:02b} = {}", accent(b), a)),
            ("S (series)", format!("{:02b} = {}", series(b), s)),
            ("G (grade)", format!("{:02b} = {}", grade(b), g)),
            ("IAST", iast),
        ],
    }
}

fn vyanjana_report(b: u8) -> ByteReport {
    let p = place(b);
    let place_str = match p {
        0 => "kaṇṭhya (velar)",
        1 => "tālavya (palatal)",
        2 => "mūrdhanya (retroflex)",
        3 => "dantya (dental)",
        4 => "oṣṭhya (labial)",
        5 => "ūṣman (sibilant)",
        6 => "antastha (sonorant)",
        _ => "kaṇṭhya/Vedic (glottal)",
    };
    let c = column(b);
    let column_str = if p <= 4 {
        match c {
            0 => "aghoṣa alpaprāṇa (voiceless unaspirated)",
            1 => "aghoṣa mahāprāṇa (voiceless aspirated)",
            2 => "saghoṣa alpaprāṇa (voiced unaspirated)",
            3 => "saghoṣa mahāprāṇa (voiced aspirated)",
            _ => "anunāsika (nasal)",
        }
    } else {
        "ordinal (non-varga)"
    };
    let iast = tables::vyanjana_iast(b).unwrap_or("?");

    ByteReport {
        byte: b,
        class: ByteClass::Vyanjana,
        label: format!("vyañjana '{}' ({}, {})", iast, place_str, column_str),
        fields: vec![
            ("PLACE", format!("{:03b} = {}", p, place_str)),
            ("COLUMN", format!("{:03b} = {}", c, column_str)),
            ("Varga", if p <= 4 { "yes" } else { "no" }.to_string()),
            ("IAST", iast.to_string()),
        ],
    }
}

fn control_report(b: u8, bhasha: bool) -> ByteReport {
    let (name, lane, class) = if bhasha {
        (
            bytes::bhasha_control_name(b).unwrap_or("reserved"),
            "bhāṣā lane (COLUMN=110)",
            ByteClass::BhashaControl,
        )
    } else {
        (
            bytes::lipi_control_name(b).unwrap_or("reserved"),
            "lipi lane (COLUMN=111)",
            ByteClass::LipiControl,
        )
    };
    ByteReport {
        byte: b,
        class,
        label: format!("{} — {}", name, lane),
        fields: vec![
            ("PLACE", format!("{:03b}", place(b))),
            ("Name", name.to_string()),
        ],
    }
}

impl fmt::Display for ByteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  0x{:02X} ({:08b}) [{:?}]",
            self.byte, self.byte, self.class
        )?;
        write!(f, "  {}", self.label)?;
        for (name, value) in &self.fields {
            write!(f, "\n    {}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Describe every byte of a whitespace-separated hex stream like
/// `"1B 40 33 24 40"`.
pub fn report_hex_stream(hex_str: &str) -> Result<Vec<ByteReport>> {
    let mut reports = Vec::new();
    for (i, token) in hex_str.split_whitespace().enumerate() {
        let cleaned = token.trim_start_matches("0x").trim_start_matches("0X");
        let b = u8::from_str_radix(cleaned, 16).map_err(|_| Error::Input {
            token: token.to_string(),
            position: i,
        })?;
        reports.push(report(b));
    }
    Ok(reports)
}
