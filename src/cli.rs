use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytchan",
    about = "List a YouTube channel's videos, download them and save their transcripts",
    version
)]
pub struct Cli {
    /// Channel URL to open first (prompts if omitted)
    pub url: Option<String>,

    /// Maximum number of videos to list per channel
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Base directory for downloads/ and transcripts/
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Preferred transcript language
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Download only, skip transcripts
    #[arg(long)]
    pub no_transcripts: bool,

    /// Show resolved configuration and progress details
    #[arg(short, long)]
    pub verbose: bool,
}
