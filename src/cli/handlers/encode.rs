use std::fs;
use std::io::Read;

use slbc::{EncodeOptions, Error, Result};

use crate::cli::args::EncodeArgs;
use crate::cli::global::GlobalArgs;

use super::print_hex;

pub fn handle(args: EncodeArgs, global: &GlobalArgs) -> Result<()> {
    let iast = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let iast = iast.trim();
    if iast.is_empty() {
        return Err(Error::Input {
            token: "(empty input)".into(),
            position: 0,
        });
    }

    let opts = EncodeOptions {
        lipi: !args.bhasha_only,
    };
    let data = slbc::encode(iast, &opts)?;

    if args.hex {
        print_hex(&data);
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &data)?;
            if !global.quiet {
                eprintln!("wrote {} bytes to {}", data.len(), path.display());
            }
        }
        None => print_hex(&data),
    }

    Ok(())
}
