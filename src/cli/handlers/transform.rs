use slbc::algebra::{self, Op};
use slbc::{Error, Result};

use crate::cli::args::TransformArgs;

use super::parse_hex_byte;

pub fn handle(args: TransformArgs) -> Result<()> {
    let byte = parse_hex_byte(&args.byte)?;

    let (name, result) = if args.op == "savarna-dirgha" {
        let second = args.byte2.as_deref().ok_or_else(|| Error::Input {
            token: "savarna-dirgha needs two bytes".into(),
            position: 0,
        })?;
        let second = parse_hex_byte(second)?;
        ("savarṇa-dīrgha", algebra::savarna_dirgha_checked(byte, second)?)
    } else {
        let op = Op::parse(&args.op).ok_or_else(|| Error::Input {
            token: args.op.clone(),
            position: 0,
        })?;
        (op.name(), algebra::apply(op, byte)?)
    };

    println!(
        "{}: {} (0x{:02X}) → {} (0x{:02X})",
        name,
        display(byte),
        byte,
        display(result),
        result
    );
    Ok(())
}

fn display(b: u8) -> String {
    slbc::tables::phoneme_iast(b).unwrap_or_else(|| "?".into())
}
