use crate::yt_dlp::MetadataRecord;
use clap::ValueEnum;
use std::{fmt, path::{Path, PathBuf}, str::FromStr};
use thiserror::Error;
use tracing::info;

mod csv;
mod html;
mod json;
mod pdf;
mod utils;

pub use utils::derive_id;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Every record in one tabular report must carry the header's fields
    #[error("record {index} does not share the field set of the first record")]
    MismatchedFields { index: usize },

    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        source: tempfile::PersistError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Json,
    Csv,
    Pdf,
    Html,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [
        ReportFormat::Json,
        ReportFormat::Csv,
        ReportFormat::Pdf,
        ReportFormat::Html,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
            ReportFormat::Html => "html",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// Formats selectable from the menu or the `--format` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportChoice {
    Json,
    Csv,
    Pdf,
    Html,
    All,
}

impl ReportChoice {
    pub fn formats(&self) -> Vec<ReportFormat> {
        match self {
            ReportChoice::Json => vec![ReportFormat::Json],
            ReportChoice::Csv => vec![ReportFormat::Csv],
            ReportChoice::Pdf => vec![ReportFormat::Pdf],
            ReportChoice::Html => vec![ReportFormat::Html],
            ReportChoice::All => ReportFormat::ALL.to_vec(),
        }
    }
}

impl FromStr for ReportChoice {
    type Err = String;

    /// Accepts menu numbers `1`-`5` as well as format names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "json" => Ok(ReportChoice::Json),
            "2" | "csv" => Ok(ReportChoice::Csv),
            "3" | "pdf" => Ok(ReportChoice::Pdf),
            "4" | "html" => Ok(ReportChoice::Html),
            "5" | "all" => Ok(ReportChoice::All),
            other => Err(format!("unknown report format: {:?}", other)),
        }
    }
}

/// Renders the records in the given format without touching the disk.
pub fn render(format: ReportFormat, records: &[MetadataRecord]) -> Result<Vec<u8>, ReportError> {
    match format {
        ReportFormat::Json => json::render(records),
        ReportFormat::Csv => csv::render(records),
        ReportFormat::Pdf => pdf::render(records),
        ReportFormat::Html => Ok(html::render(records).into_bytes()),
    }
}

/// Writes `<folder>/<stem>.<ext>`. The file only appears once it is
/// complete, a failed render leaves nothing behind.
pub fn save(
    format: ReportFormat,
    records: &[MetadataRecord],
    stem: &str,
    folder: &Path,
) -> Result<PathBuf, ReportError> {
    let contents = render(format, records)?;
    let path = folder.join(format!("{}.{}", stem, format.extension()));
    utils::write_atomically(folder, &path, &contents)?;
    info!(path = %path.display(), format = %format, "Report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yt_dlp::VideoInfo;
    use tempfile::tempdir;

    fn record(id: &str) -> MetadataRecord {
        MetadataRecord::from_info(VideoInfo {
            title: Some(format!("Video {}", id)),
            webpage_url: Some(format!("https://www.youtube.com/watch?v={}", id)),
            ..Default::default()
        })
    }

    #[test]
    fn test_choice_from_menu_and_name() {
        assert_eq!("1".parse::<ReportChoice>(), Ok(ReportChoice::Json));
        assert_eq!(" 5 ".parse::<ReportChoice>(), Ok(ReportChoice::All));
        assert_eq!("HTML".parse::<ReportChoice>(), Ok(ReportChoice::Html));
        assert!("6".parse::<ReportChoice>().is_err());
        assert!("".parse::<ReportChoice>().is_err());
        assert_eq!(ReportChoice::All.formats(), ReportFormat::ALL.to_vec());
    }

    #[test]
    fn test_every_format_handles_empty_list() {
        for format in ReportFormat::ALL {
            assert!(render(format, &[]).is_ok(), "{} failed on empty input", format);
        }
    }

    #[test]
    fn test_save_names_file_after_stem() {
        let dir = tempdir().unwrap();
        let records = vec![record("A")];
        let stem = derive_id(&records[0].video_url());

        for format in ReportFormat::ALL {
            let path = save(format, &records, &stem, dir.path()).unwrap();
            assert_eq!(path, dir.path().join(format!("A.{}", format.extension())));
            assert!(path.exists());
        }
    }

    #[test]
    fn test_failed_render_leaves_no_file() {
        let dir = tempdir().unwrap();
        let odd: MetadataRecord = serde_json::from_str(r#"{"Title": "x"}"#).unwrap();
        let records = vec![record("A"), odd];

        let result = save(ReportFormat::Csv, &records, "A", dir.path());

        assert!(matches!(result, Err(ReportError::MismatchedFields { index: 1 })));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_likes_render_as_sentinel_in_every_format() {
        let records = vec![record("A")];
        let text = |format| String::from_utf8(render(format, &records).unwrap()).unwrap();

        assert!(text(ReportFormat::Json).contains("\"Likes\": \"N/A\""));

        let csv = text(ReportFormat::Csv);
        let mut reader = ::csv::Reader::from_reader(csv.as_bytes());
        let likes = reader
            .headers()
            .unwrap()
            .iter()
            .position(|header| header == "Likes")
            .unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[likes], "N/A");

        assert!(text(ReportFormat::Html).contains("<td><strong>Likes</strong></td><td>N/A</td>"));

        let pdf_lines: Vec<String> = pdf::layout(&records)
            .into_iter()
            .flat_map(|page| page.lines.into_iter().map(|(_, line)| line))
            .collect();
        assert!(pdf_lines.iter().any(|line| line == "Likes: N/A"));
        assert!(!pdf_lines.iter().any(|line| line == "Likes: 0"));
    }
}
