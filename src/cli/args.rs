use crate::{report::ReportChoice, yt_dlp::DEFAULT_CONCURRENCY};
use clap::Parser;
use std::path::PathBuf;

/// YouTube Video Metadata Extractor
#[derive(Debug, Parser)]
#[command(name = "yt-metadata-extractor", version)]
pub struct Cli {
    /// YouTube video URLs or IDs (space-separated), prompts when omitted
    pub urls: Vec<String>,

    /// Output folder for reports
    #[arg(long, env = "YT_METADATA_OUTPUT", default_value = "report")]
    pub output: PathBuf,

    /// Report format, prompts when omitted
    #[arg(long, value_enum)]
    pub format: Option<ReportChoice>,

    /// Maximum number of lookups in flight, 0 for one per URL
    #[arg(long, env = "YT_METADATA_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Network timeout handed to yt-dlp, in seconds
    #[arg(long, env = "YT_METADATA_SOCKET_TIMEOUT", default_value = "15")]
    pub socket_timeout: String,

    /// Path to the yt-dlp executable, looked up on PATH by default
    #[arg(long, env = "YT_METADATA_YOUTUBE_DL_PATH")]
    pub youtube_dl_path: Option<PathBuf>,

    /// Log file, truncated on every run
    #[arg(long, env = "YT_METADATA_LOG_FILE", default_value = "log/yt_metadata_extractor.log")]
    pub log_file: PathBuf,

    /// Exit with an error when any URL could not be fetched
    #[arg(long)]
    pub strict: bool,

    /// Do not print the metadata tables
    #[arg(long, short)]
    pub quiet: bool,
}
