use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::export::ExportError;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 40;
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 12;
pub const WRAP_COLUMNS: usize = 90;

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize
}

/// Map to printable ASCII. Dashes and quotes are normalized, anything else
/// outside the range becomes `?`.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => Some('-'),
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{201C}' | '\u{201D}' => Some('"'),
            '\u{2026}' => Some('.'),
            '\t' => Some(' '),
            '\r' => None,
            c if c == '\n' || (' '..='~').contains(&c) => Some(c),
            _ => Some('?'),
        })
        .collect()
}

/// Hard-wrap each line at `width` columns, preferring word boundaries.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.lines() {
        if raw.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in raw.split(' ') {
            let mut word = word;
            while word.len() > width {
                if !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                }
                let (head, tail) = word.split_at(width);
                out.push(head.to_string());
                word = tail;
            }
            let needed = if line.is_empty() { word.len() } else { line.len() + 1 + word.len() };
            if needed > width {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        out.push(line);
    }
    out
}

fn page_content(lines: &[String]) -> Content {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(FONT_SIZE)]),
        Operation::new("TL", vec![Object::Integer(LEADING)]),
        Operation::new("Td", vec![Object::Integer(MARGIN), Object::Integer(PAGE_HEIGHT - MARGIN - FONT_SIZE)]),
    ];
    for line in lines {
        ops.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
        ops.push(Operation::new("T*", vec![]));
    }
    ops.push(Operation::new("ET", vec![]));
    Content { operations: ops }
}

/// Render plain text as a Courier PDF on A4 pages.
pub fn render_pdf(text: &str) -> Result<Vec<u8>, ExportError> {
    let lines = wrap(&sanitize(text), WRAP_COLUMNS);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let empty: &[String] = &[];
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![empty]
    } else {
        lines.chunks(lines_per_page()).collect()
    };

    let mut kids: Vec<ObjectId> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let encoded = page_content(chunk)
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id);
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
        "Count" => Object::Integer(count),
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

    let mut buf = Vec::new();
    doc.save_to(&mut buf).map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(buf)
}
