use std::fs;

use slbc::{CodecConfig, Error, Result, Script};

use crate::cli::args::DecodeArgs;
use crate::cli::global::GlobalArgs;

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    config: &CodecConfig,
    strict: bool,
) -> Result<()> {
    let script_name = args.to.as_deref().unwrap_or(&config.default_script);
    let script = Script::parse(script_name).ok_or_else(|| Error::Input {
        token: script_name.to_string(),
        position: 0,
    })?;

    let data = fs::read(&args.input)?;
    let text = slbc::decode_with(&data, script, strict)?;

    match &args.output {
        Some(path) => {
            fs::write(path, text.as_bytes())?;
            if !global.quiet {
                eprintln!("wrote {} chars to {}", text.chars().count(), path.display());
            }
        }
        None => println!("{}", text),
    }

    Ok(())
}
