use crate::yt_dlp::MetadataRecord;
use html_escape::{encode_double_quoted_attribute, encode_text};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>YouTube Video Metadata Report</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #333; }
        .video-details { margin-bottom: 20px; }
        .video-details h2 { color: #555; }
        .video-details img { max-width: 100%; height: auto; }
        .video-details table { width: 100%; border-collapse: collapse; margin-top: 10px; }
        .video-details th, .video-details td { padding: 10px; border: 1px solid #ddd; text-align: left; }
        .video-details th { background-color: #f4f4f4; }
    </style>
</head>
<body>
    <h1>YouTube Video Metadata Report</h1>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Self-contained page with one block per record. Every value is escaped,
/// titles and descriptions routinely contain `<`, `>` and `&`.
pub fn render(records: &[MetadataRecord]) -> String {
    let mut html = String::from(HEAD);

    for record in records {
        html.push_str("    <div class=\"video-details\">\n");
        html.push_str(&format!(
            "        <h2>{}</h2>\n",
            encode_text(&record.text(MetadataRecord::TITLE))
        ));
        html.push_str(&format!(
            "        <img src=\"{}\" alt=\"Thumbnail\">\n",
            encode_double_quoted_attribute(&record.text(MetadataRecord::THUMBNAIL))
        ));
        html.push_str(
            "        <table>\n            <thead>\n                <tr><th>Field</th><th>Value</th></tr>\n            </thead>\n            <tbody>\n",
        );

        for (name, value) in record.display_pairs() {
            if name == MetadataRecord::THUMBNAIL {
                continue;
            }
            html.push_str(&format!(
                "                <tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
                encode_text(name),
                encode_text(&value)
            ));
        }

        html.push_str("            </tbody>\n        </table>\n    </div>\n");
    }

    html.push_str(TAIL);
    html
}
