use std::fs;

use slbc::{Container, Error, ExtractMode, RegistrySet, Result};

use crate::cli::args::ExtractArgs;
use crate::cli::global::GlobalArgs;

use super::print_hex;

pub fn handle(
    args: ExtractArgs,
    global: &GlobalArgs,
    registries: &RegistrySet,
    strict: bool,
) -> Result<()> {
    let mode = ExtractMode::parse(&args.mode).ok_or_else(|| Error::Input {
        token: args.mode.clone(),
        position: 0,
    })?;

    let data = fs::read(&args.input)?;
    let container = Container::parse(&data, strict)?;

    // external DICT references resolve relative to the container's directory
    let base_dir = args.input.parent();
    let extracted = slbc::extract::extract(&container, mode, registries, base_dir)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &extracted)?;
            if !global.quiet {
                eprintln!("wrote {} bytes to {}", extracted.len(), path.display());
            }
        }
        None => print_hex(&extracted),
    }

    Ok(())
}
