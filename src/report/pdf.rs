use super::ReportError;
use crate::yt_dlp::MetadataRecord;
use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, ObjectId, Stream,
};

// US Letter, in points
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;

const TITLE: &str = "YouTube Video Metadata Report";
const TITLE_X: i64 = 200;
const TITLE_SIZE: i64 = 16;

const MARGIN_LEFT: i64 = 50;
const MARGIN_BOTTOM: i64 = 50;
const BODY_SIZE: i64 = 12;
const LEADING: i64 = 20;
const TOP: i64 = PAGE_HEIGHT - 40;
const BODY_START: i64 = PAGE_HEIGHT - 80;

/// Roughly 500pt of Helvetica at 12pt
const WRAP_WIDTH: usize = 85;
const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Default, PartialEq)]
pub(super) struct Page {
    pub(super) lines: Vec<(i64, String)>,
}

/// Places every body line on a page, breaking to a new one when the cursor
/// drops below the bottom margin. Nothing is ever dropped.
pub(super) fn layout(records: &[MetadataRecord]) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut y = BODY_START;

    let mut emit = |text: String, pages: &mut Vec<Page>| {
        if let Some(page) = pages.last_mut() {
            page.lines.push((y, text));
        }
        y -= LEADING;
        if y < MARGIN_BOTTOM {
            pages.push(Page::default());
            y = TOP;
        }
    };

    for record in records {
        emit("-".repeat(SEPARATOR_WIDTH), &mut pages);
        for (name, value) in record.display_pairs() {
            for line in wrap(&format!("{}: {}", name, value)) {
                emit(line, &mut pages);
            }
        }
    }

    // A break after the very last line leaves an empty trailing page
    if pages.len() > 1 && pages.last().map_or(false, |page| page.lines.is_empty()) {
        pages.pop();
    }
    pages
}

fn wrap(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            let line = line.replace('\t', " ");
            let wrapped: Vec<String> = textwrap::wrap(&line, WRAP_WIDTH)
                .into_iter()
                .map(|part| part.into_owned())
                .collect();
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped
            }
        })
        .collect()
}

/// Helvetica is a standard font with a single-byte encoding, anything
/// outside Latin-1 is replaced.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte) if !c.is_control() => byte,
            _ => b'?',
        })
        .collect()
}

fn show_text(font: &str, size: i64, x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(size)],
        ),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        Operation::new("Tj", vec![Object::string_literal(encode(text))]),
        Operation::new("ET", vec![]),
    ]
}

fn font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    })
}

pub fn render(records: &[MetadataRecord]) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids = Vec::new();
    for (index, page) in layout(records).into_iter().enumerate() {
        let mut operations = Vec::new();
        if index == 0 {
            operations.extend(show_text("F2", TITLE_SIZE, TITLE_X, TOP, TITLE));
        }
        for (y, line) in &page.lines {
            operations.extend(show_text("F1", BODY_SIZE, MARGIN_LEFT, *y, line));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yt_dlp::{FormatInfo, VideoInfo};

    fn record_with_formats(count: usize) -> MetadataRecord {
        MetadataRecord::from_info(VideoInfo {
            title: Some("Long one".to_string()),
            description: Some("word ".repeat(100)),
            formats: Some(
                (0..count)
                    .map(|i| FormatInfo {
                        format: Some(format!("{} - 1920x1080 (1080p)", i)),
                        ext: Some("mp4".to_string()),
                    })
                    .collect(),
            ),
            ..Default::default()
        })
    }

    fn line_count(pages: &[Page]) -> usize {
        pages.iter().map(|page| page.lines.len()).sum()
    }

    #[test]
    fn test_short_record_fits_one_page() {
        let pages = layout(&[MetadataRecord::from_info(VideoInfo::default())]);
        assert_eq!(pages.len(), 1);
        // separator + 19 fields
        assert_eq!(line_count(&pages), 20);
        assert_eq!(pages[0].lines[0], (BODY_START, "-".repeat(80)));
        assert_eq!(pages[0].lines[1].0, BODY_START - LEADING);
    }

    #[test]
    fn test_overflow_starts_new_page_without_losing_lines() {
        let record = record_with_formats(100);
        let expected: usize = 1 + record
            .display_pairs()
            .iter()
            .map(|(name, value)| wrap(&format!("{}: {}", name, value)).len())
            .sum::<usize>();

        let pages = layout(&[record]);

        assert!(pages.len() > 1);
        assert_eq!(line_count(&pages), expected);
        assert_eq!(pages[1].lines[0].0, TOP);
        for page in &pages {
            assert!(page.lines.iter().all(|(y, _)| *y >= MARGIN_BOTTOM && *y <= TOP));
        }
    }

    #[test]
    fn test_wrap_width() {
        let lines = wrap(&format!("Description: {}", "lorem ipsum ".repeat(30)));
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= WRAP_WIDTH));
    }

    #[test]
    fn test_encode_replaces_unsupported() {
        assert_eq!(encode("Caf\u{e9}"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(encode("\u{65e5}\n"), b"??".to_vec());
    }

    #[test]
    fn test_render_page_count() {
        let empty = Document::load_mem(&render(&[]).unwrap()).unwrap();
        assert_eq!(empty.get_pages().len(), 1);

        let long = render(&[record_with_formats(100), record_with_formats(100)]).unwrap();
        assert!(long.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&long).unwrap();
        assert_eq!(doc.get_pages().len(), layout(&[record_with_formats(100), record_with_formats(100)]).len());
    }
}
