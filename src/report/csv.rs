use super::ReportError;
use crate::yt_dlp::MetadataRecord;

/// One row per record under a header taken from the first record.
///
/// All records must carry the same field names in the same order, the
/// whole report is rejected otherwise.
pub fn render(records: &[MetadataRecord]) -> Result<Vec<u8>, ReportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    if let Some(first) = records.first() {
        let header: Vec<&str> = first.field_names().collect();
        writer.write_record(&header)?;

        for (index, record) in records.iter().enumerate() {
            if !record.field_names().eq(header.iter().copied()) {
                return Err(ReportError::MismatchedFields { index });
            }
            writer.write_record(record.iter().map(|(_, value)| value.display()))?;
        }
    }

    writer
        .into_inner()
        .map_err(|error| ReportError::Io(error.into_error()))
}
