pub mod args;
pub mod global;
pub mod handlers;

use clap::{Parser, Subcommand};
use slbc::{CodecConfig, Error, RegistrySet};

#[derive(Parser)]
#[command(name = "slbc")]
#[command(version)]
#[command(about = "Sanskrit Linguistic Binary Codec", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: global::GlobalArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode IAST text to an .slbc container
    #[command(visible_alias = "e")]
    Encode(args::EncodeArgs),

    /// Decode an .slbc container to text
    #[command(visible_alias = "d")]
    Decode(args::DecodeArgs),

    /// Re-project a container into patha / bhasha-only / vyakhya form
    Extract(args::ExtractArgs),

    /// Explain stream bytes or a whole container
    Inspect(args::InspectArgs),

    /// Apply an algebraic transformation to a byte
    Transform(args::TransformArgs),

    /// Encode then decode, reporting the first disagreement
    Roundtrip(args::RoundtripArgs),

    /// Attach vyākaraṇa annotations from a JSON description
    Annotate(args::AnnotateArgs),

    /// Work with registry files
    Registry {
        #[command(subcommand)]
        action: args::RegistryAction,
    },
}

pub fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    let config = CodecConfig::load_with_overrides();

    // Session registries: builtins plus configured extensions, immutable
    // once command handling begins.
    let mut registries = RegistrySet::builtin();
    for path in &config.extensions {
        registries.load_extension(path)?;
    }

    let strict = cli.global.strict || config.strict;

    match cli.command {
        Commands::Encode(args) => handlers::encode::handle(args, &cli.global),
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &config, strict),
        Commands::Extract(args) => handlers::extract::handle(args, &cli.global, &registries, strict),
        Commands::Inspect(args) => handlers::inspect::handle(args, strict),
        Commands::Transform(args) => handlers::transform::handle(args),
        Commands::Roundtrip(args) => handlers::roundtrip::handle(args),
        Commands::Annotate(args) => handlers::annotate::handle(args, &cli.global, registries, strict),
        Commands::Registry { action } => handlers::registry::handle(action, &cli.global, &registries),
    }
}
