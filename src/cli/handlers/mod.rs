pub mod annotate;
pub mod decode;
pub mod encode;
pub mod extract;
pub mod inspect;
pub mod registry;
pub mod roundtrip;
pub mod transform;

use slbc::{Error, Result};

/// Print a binary blob as a 16-bytes-per-line hex dump.
pub fn print_hex(data: &[u8]) {
    for (i, row) in data.chunks(16).enumerate() {
        println!("{:08X}  {}", i * 16, hex_row(row));
    }
}

fn hex_row(row: &[u8]) -> String {
    row.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a hex byte argument like `44` or `0x44`.
pub fn parse_hex_byte(s: &str) -> Result<u8> {
    let cleaned = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    u8::from_str_radix(cleaned, 16).map_err(|_| Error::Input {
        token: s.to_string(),
        position: 0,
    })
}
