use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;
use std::fmt;

/// Placeholder shown for any value the platform did not report
pub const NOT_AVAILABLE: &str = "N/A";

const DESCRIPTION_LIMIT: usize = 300;
const ELLIPSIS: &str = "...";

/// Fields of the yt-dlp info dict this tool reads. Everything is optional,
/// the platform omits whatever it does not know.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub uploader_url: Option<String>,
    pub upload_date: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub view_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub like_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub dislike_count: Option<u64>,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub format: Option<String>,
    pub fps: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub age_limit: Option<u64>,
    pub thumbnail: Option<String>,
    pub webpage_url: Option<String>,
    pub tags: Option<Vec<Option<String>>>,
    pub categories: Option<Vec<Option<String>>>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub subtitles: Option<Value>,
    pub formats: Option<Vec<FormatInfo>>,
}

/// One encoding the platform offers for a video
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FormatInfo {
    pub format: Option<String>,
    pub ext: Option<String>,
}

// yt-dlp reports counters as integers, but some extractors emit floats.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Display value of a single record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Flattened single-line rendering, lists are joined with `, `
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

/// Metadata of one successfully fetched video: an ordered mapping from
/// field name to display value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataRecord {
    fields: Vec<(String, FieldValue)>,
}

impl MetadataRecord {
    pub const TITLE: &'static str = "Title";
    pub const THUMBNAIL: &'static str = "Thumbnail";
    pub const VIDEO_URL: &'static str = "Video URL";

    /// Builds the fixed field set from a client response.
    pub fn from_info(info: VideoInfo) -> Self {
        let text_or_na = |value: Option<String>| {
            FieldValue::text(value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
        };
        let count_or_na = |value: Option<u64>| {
            FieldValue::text(value.map_or_else(|| NOT_AVAILABLE.to_string(), group_thousands))
        };

        let dislikes = info.dislike_count.filter(|count| *count > 0);
        let duration = match info.duration {
            Some(seconds) => format!("{:.2} min", seconds / 60.0),
            None => NOT_AVAILABLE.to_string(),
        };
        let fps = match info.fps {
            Some(fps) => fps.to_string(),
            None => NOT_AVAILABLE.to_string(),
        };
        let age_restricted = if info.age_limit.unwrap_or(0) > 0 {
            "Yes"
        } else {
            "No"
        };
        let has_subtitles = match &info.subtitles {
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            _ => false,
        };
        let formats = info
            .formats
            .unwrap_or_default()
            .into_iter()
            .map(|f| {
                format!(
                    "{} ({})",
                    f.format.as_deref().unwrap_or(NOT_AVAILABLE),
                    f.ext.as_deref().unwrap_or(NOT_AVAILABLE)
                )
            })
            .collect();

        let fields = vec![
            (Self::TITLE, text_or_na(info.title)),
            ("Uploader", text_or_na(info.uploader)),
            ("Channel URL", text_or_na(info.uploader_url)),
            ("Upload Date", text_or_na(info.upload_date)),
            ("Views", count_or_na(info.view_count)),
            ("Likes", count_or_na(info.like_count)),
            ("Dislikes", count_or_na(dislikes)),
            ("Duration", FieldValue::text(duration)),
            ("Resolution", text_or_na(info.format)),
            ("FPS", FieldValue::text(fps)),
            ("Age Restriction", FieldValue::text(age_restricted)),
            (Self::THUMBNAIL, text_or_na(info.thumbnail)),
            (Self::VIDEO_URL, text_or_na(info.webpage_url)),
            ("Tags", FieldValue::text(join_or(info.tags, "No Tags"))),
            (
                "Categories",
                FieldValue::text(join_or(info.categories, "No Categories")),
            ),
            (
                "Description",
                FieldValue::text(truncate_description(info.description.as_deref())),
            ),
            ("Language", text_or_na(info.language)),
            (
                "Subtitles",
                FieldValue::text(if has_subtitles { "Yes" } else { "No" }),
            ),
            ("Formats", FieldValue::List(formats)),
        ];

        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Field name and flattened value pairs, in field order
    pub fn display_pairs(&self) -> Vec<(&str, String)> {
        self.iter()
            .map(|(name, value)| (name, value.display()))
            .collect()
    }

    /// Text of a field, `N/A` when the record has no such field
    pub fn text(&self, name: &str) -> String {
        self.get(name)
            .map_or_else(|| NOT_AVAILABLE.to_string(), FieldValue::display)
    }

    pub fn video_url(&self) -> String {
        self.text(Self::VIDEO_URL)
    }
}

impl Serialize for MetadataRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = MetadataRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of field names to text or lists of text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, FieldValue>()? {
            fields.push((name, value));
        }
        Ok(MetadataRecord { fields })
    }
}

impl<'de> Deserialize<'de> for MetadataRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn join_or(items: Option<Vec<Option<String>>>, empty: &str) -> String {
    let items: Vec<String> = items.unwrap_or_default().into_iter().flatten().collect();
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

/// Keeps the first 300 characters and always appends the ellipsis marker.
fn truncate_description(description: Option<&str>) -> String {
    let description = description.unwrap_or("No Description");
    let mut truncated: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
