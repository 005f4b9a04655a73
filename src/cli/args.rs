use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for encoding IAST text
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// IAST text to encode (reads --input or stdin if omitted)
    pub text: Option<String>,

    /// Input file with IAST text
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (.slbc); hex dump to stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a hex dump instead of writing binary
    #[arg(long)]
    pub hex: bool,

    /// Emit the bhāṣā-canonical form (no lipi layer)
    #[arg(long)]
    pub bhasha_only: bool,
}

/// Arguments for decoding a container
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input .slbc file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output script: iast or devanagari
    #[arg(long)]
    pub to: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for extraction
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input .slbc file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Extraction mode: patha, bhasha-only, or vyakhya
    #[arg(long)]
    pub mode: String,

    /// Output .slbc file (hex dump to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for byte inspection
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Single byte to inspect (e.g. 0x1B)
    #[arg(long)]
    pub byte: Option<String>,

    /// Whitespace-separated hex stream (e.g. "1B 40 33 24 40")
    #[arg(long)]
    pub from_hex: Option<String>,

    /// .slbc file to inspect
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Arguments for algebraic transformation
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Operation: guna, vrddhi, dirgha, hrasva, jastva, toggle-voice,
    /// toggle-aspiration, nasal, homorganic-nasal, samprasarana-svara,
    /// samprasarana-sonorant, savarna-dirgha
    #[arg(long)]
    pub op: String,

    /// Input byte (hex, e.g. 0x44)
    pub byte: String,

    /// Second byte (savarna-dirgha only)
    pub byte2: Option<String>,
}

/// Arguments for round-trip checking
#[derive(Args, Debug)]
pub struct RoundtripArgs {
    /// IAST text to test
    pub text: String,
}

/// Arguments for annotation
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Input .slbc file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Annotation layer to add (only "vya" is defined)
    #[arg(long)]
    pub add: String,

    /// JSON annotation file
    #[arg(long)]
    pub from: PathBuf,

    /// Dhātu extension registry (.sldr)
    #[arg(long)]
    pub sldr: Option<PathBuf>,

    /// Prātipadika extension registry (.slpr)
    #[arg(long)]
    pub slpr: Option<PathBuf>,

    /// Sandhi-rule extension registry (.slsr)
    #[arg(long)]
    pub slsr: Option<PathBuf>,

    /// Output .slbc file (hex dump to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Registry subcommands
#[derive(Subcommand, Debug)]
pub enum RegistryAction {
    /// Compile a TSV source into a binary registry file
    Compile {
        /// Registry kind: dhatu, pratipadika, or sandhi
        kind: String,

        /// TSV input file
        input: PathBuf,

        /// Output file (defaults to the input with the kind's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a binary registry file's header and entries
    Inspect {
        /// Registry file (.sldr/.slpr/.slsr)
        file: PathBuf,
    },

    /// Look up an entry by id or IAST form
    Lookup {
        /// Registry kind: dhatu, pratipadika, or sandhi
        kind: String,

        /// Numeric id or IAST string
        query: String,

        /// Search a registry file instead of the builtin table
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Summarize the builtin (or a given) registry
    Stats {
        /// Registry file (.sldr/.slpr/.slsr)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}
