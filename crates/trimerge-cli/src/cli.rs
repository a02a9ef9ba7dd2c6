use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use trimerge_merge::DiffAlgorithm;

#[derive(Parser)]
#[command(
    name = "trimerge",
    about = "Three-way merge of text files with diff3-style conflict markers",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
            AlgorithmArg::Patience => DiffAlgorithm::Patience,
            AlgorithmArg::Lcs => DiffAlgorithm::Lcs,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge two edited files against their common base. Exits 0 when clean, 1 on conflict
    Merge(MergeArgs),
    /// Show the tagged line diff of a file against its base
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// "My" file
    pub my: PathBuf,
    /// Common ancestor
    pub base: PathBuf,
    /// "Other" file
    pub other: PathBuf,
    /// Merged file; standard output when omitted
    pub output: Option<PathBuf>,
    /// TOML merge configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub algorithm: Option<AlgorithmArg>,
    /// Lines matching this regex never conflict; mine's version is kept
    #[arg(long, conflicts_with = "svn_keywords")]
    pub keyword_pattern: Option<String>,
    /// Treat `// $Keyword$` comment lines as volatile
    #[arg(long)]
    pub svn_keywords: bool,
    /// Label on the opening conflict marker
    #[arg(long)]
    pub label_mine: Option<String>,
    /// Label on the closing conflict marker
    #[arg(long)]
    pub label_other: Option<String>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub base: PathBuf,
    pub variant: PathBuf,
    #[arg(long, default_value = "myers")]
    pub algorithm: AlgorithmArg,
}
