use super::ReportError;
use crate::yt_dlp::MetadataRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

pub fn render(records: &[MetadataRecord]) -> Result<Vec<u8>, ReportError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}
