use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar (BNF, with optional EBNF sugar)
    pub file: PathBuf,

    /// Replay the step trace of one analysis: FIRST, FOLLOW, PREDICT or LL1
    #[arg(short, long, value_name = "TYPE")]
    pub trace: Option<String>,

    /// Show only this step of the replayed trace (default: all steps)
    #[arg(short, long, value_name = "INDEX", requires = "trace")]
    pub step: Option<usize>,
}
