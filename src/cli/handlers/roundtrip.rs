use slbc::{EncodeOptions, Error, Result, Script};

use crate::cli::args::RoundtripArgs;

pub fn handle(args: RoundtripArgs) -> Result<()> {
    let input = args.text.trim();

    let data = slbc::encode(input, &EncodeOptions::default())?;
    let decoded = slbc::decode(&data, Script::Iast)?;
    let devanagari = slbc::decode(&data, Script::Devanagari)?;

    eprintln!("input (IAST):  {}", input);
    eprintln!("container:     {} bytes", data.len());
    eprintln!("output (IAST): {}", decoded);
    eprintln!("output (deva): {}", devanagari);

    if decoded == input {
        eprintln!("round-trip ok");
        return Ok(());
    }

    // report the first disagreement, not all of them
    let at = input
        .chars()
        .zip(decoded.chars())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| input.chars().count().min(decoded.chars().count()));
    eprintln!(
        "round-trip mismatch at character {}: expected {:?}, got {:?}",
        at,
        input.chars().nth(at),
        decoded.chars().nth(at)
    );
    Err(Error::Invariant("round-trip produced different text"))
}
