#[deny(clippy::all)]
use anyhow::{bail, Context};
use clap::Parser;
use cli::Cli;
use dotenv::dotenv;
use indicatif::{ProgressBar, ProgressStyle};
use report::{ReportChoice, ReportFormat};
use std::{io, path::Path, sync::Arc};
use tracing::{error, info, warn};
use yt_dlp::{fetch_all, FailurePolicy, FetchOptions, MetadataRecord, YtDlpClient};

mod cli;
mod report;
mod utils;
mod yt_dlp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Environment variables from ".env" feed the CLI defaults.
    let cli = Cli::parse();

    println!("{}", utils::BANNER);
    utils::init_logging(&cli.log_file)?;
    info!("Run started");
    println!("Logs will be saved to: {}", cli.log_file.display());

    if utils::ensure_output_folder(&cli.output)? {
        info!(folder = %cli.output.display(), "Created output folder");
    }

    let urls = if cli.urls.is_empty() {
        match cli::prompt_urls(&mut io::stdin().lock(), &mut io::stdout())? {
            Some(urls) => urls,
            None => {
                println!("Invalid option! Exiting...");
                warn!("Invalid input option selected");
                return Ok(());
            }
        }
    } else {
        cli.urls.clone()
    };

    if urls.is_empty() {
        println!("No video URLs given, nothing to do.");
        warn!("No video URLs given");
        return Ok(());
    }

    let client = Arc::new(YtDlpClient::new(
        cli.socket_timeout.clone(),
        cli.youtube_dl_path.clone(),
    ));
    let options = FetchOptions {
        concurrency: cli.concurrency,
        failure_policy: if cli.strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Drop
        },
    };

    let progress = ProgressBar::new(urls.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg}: {percent:>3}%|{bar:40}| {pos}/{len} [{elapsed}] video")
            .context("Invalid progress bar template")?,
    );
    progress.set_message("Extracting Metadata");

    let summary = fetch_all(client, urls, &options, &progress).await;
    progress.finish();

    println!(
        "\nMetadata extraction completed: {} fetched, {} failed\n",
        summary.records.len(),
        summary.failed
    );

    if !cli.quiet {
        for record in &summary.records {
            println!("{}", cli::render_table(record));
        }
    }

    if !summary.records.is_empty() {
        let choice = match cli.format {
            Some(choice) => Some(choice),
            None => cli::prompt_report_choice(&mut io::stdin().lock(), &mut io::stdout())?,
        };

        match choice {
            Some(choice) => save_reports(&summary.records, choice, &cli.output),
            None => {
                println!("Invalid choice, no report generated.");
                warn!("Invalid report format selected");
            }
        }
    }

    if summary.is_failure(options.failure_policy) {
        bail!("{} video(s) could not be fetched", summary.failed);
    }

    info!("Run finished");
    Ok(())
}

/// One file per record per format. A failing report is logged and skipped.
fn save_reports(records: &[MetadataRecord], choice: ReportChoice, folder: &Path) {
    for record in records {
        let stem = report::derive_id(&record.video_url());
        for format in choice.formats() {
            save_report(record, format, &stem, folder);
        }
    }
}

fn save_report(record: &MetadataRecord, format: ReportFormat, stem: &str, folder: &Path) {
    match report::save(format, std::slice::from_ref(record), stem, folder) {
        Ok(path) => println!("{} report saved as '{}'", format, path.display()),
        Err(err) => {
            error!(format = %format, stem = %stem, error = %err, "Failed to save report");
            eprintln!("Failed to save {} report for {}: {}", format, stem, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use tempfile::tempdir;
    use crate::yt_dlp::{MetadataClient, VideoInfo};

    /// Resolves `A` and rejects everything else.
    struct OnlyA;

    #[async_trait]
    impl MetadataClient for OnlyA {
        async fn fetch(&self, identifier: &str) -> anyhow::Result<VideoInfo> {
            if identifier != "A" {
                return Err(anyhow!("Video unavailable"));
            }
            Ok(VideoInfo {
                title: Some("Video A".to_string()),
                webpage_url: Some("https://www.youtube.com/watch?v=A".to_string()),
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn test_failed_video_produces_no_report() {
        let dir = tempdir().unwrap();
        let summary = fetch_all(
            Arc::new(OnlyA),
            vec!["A".to_string(), "B".to_string()],
            &FetchOptions::default(),
            &ProgressBar::hidden(),
        )
        .await;

        assert_eq!(summary.records.len(), 1);
        assert!(summary.records[0].video_url().ends_with("=A"));

        save_reports(&summary.records, ReportChoice::Json, dir.path());

        let mut files: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        assert_eq!(files, vec!["A.json".to_string()]);
    }
}
