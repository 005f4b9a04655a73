use clap::Args;

/// Global arguments that apply to all subcommands
#[derive(Args)]
pub struct GlobalArgs {
    /// Suppress informational notices
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Strict container parsing: unknown chunk types are errors
    #[arg(long, global = true)]
    pub strict: bool,
}
