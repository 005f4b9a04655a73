use std::fs;

use slbc::container::{chunk_name, CHUNK_BHA, CHUNK_DICT, CHUNK_PHON};
use slbc::dict::DictPayload;
use slbc::{inspect, Container, Error, Result};

use crate::cli::args::InspectArgs;

pub fn handle(args: InspectArgs, strict: bool) -> Result<()> {
    if let Some(byte_str) = &args.byte {
        let b = super::parse_hex_byte(byte_str)?;
        println!("{}", inspect::report(b));
        return Ok(());
    }

    if let Some(hex_str) = &args.from_hex {
        for (i, report) in inspect::report_hex_stream(hex_str)?.iter().enumerate() {
            if i > 0 {
                println!("  ---");
            }
            println!("{}", report);
        }
        return Ok(());
    }

    if let Some(path) = &args.input {
        let data = fs::read(path)?;
        let container = Container::parse(&data, strict)?;
        print_container(&container)?;
        return Ok(());
    }

    Err(Error::Input {
        token: "provide --byte, --from-hex, or --input".into(),
        position: 0,
    })
}

fn print_container(container: &Container) -> Result<()> {
    let header = &container.header;
    println!("=== SLBC container ===");
    println!(
        "  version: {}.{}.{}.{}",
        header.version[0], header.version[1], header.version[2], header.version[3]
    );
    println!("  flags:   0b{:08b}", header.flags);
    println!("    HAS_LIPI:    {}", header.has_lipi());
    println!("    HAS_META:    {}", header.has_meta());
    println!("    INTERLEAVED: {}", header.is_interleaved());
    println!("    VEDIC:       {}", header.is_vedic());
    println!("    VYA:         {}", header.has_vya());
    println!("  mode:    {:?}", header.mode());
    println!("  extended header: {} bytes", header.extended.len());
    println!("  chunks:  {}", container.chunks.len());

    for (i, chunk) in container.chunks.iter().enumerate() {
        println!(
            "\n  chunk {} — {} (0x{:02X}), {} bytes",
            i,
            chunk_name(chunk.kind),
            chunk.kind,
            chunk.payload.len()
        );
        match chunk.kind {
            CHUNK_PHON | CHUNK_BHA => {
                for &b in &chunk.payload {
                    let report = inspect::report(b);
                    println!("    0x{:02X}  {}", b, report.label);
                }
            }
            CHUNK_DICT => match DictPayload::parse(&chunk.payload) {
                Ok(payload) => println!("    {:?}", payload),
                Err(err) => println!("    (unparseable: {})", err),
            },
            _ => {}
        }
    }
    Ok(())
}
