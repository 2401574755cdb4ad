//! Minimal text-to-PDF export built on `lopdf`.
//!
//! Reports are plain filled text, so the export only needs line wrapping
//! over A4 pages with built-in Type1 fonts. Body text is encoded to WinAnsi
//! for Helvetica; the tick glyphs fall outside WinAnsi and are emitted as
//! ZapfDingbats runs instead, with a ToUnicode CMap so text extraction maps
//! them back to the original code points. The document title is written to
//! the PDF Info dictionary so the CAPA number is carried verbatim.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::render::RenderError;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: f32 = 50.0;
const FONT_SIZE: f32 = 10.0;
const LEADING: f32 = 14.0;
/// Conservative fit for 10pt Helvetica between A4 margins.
const MAX_LINE_CHARS: usize = 95;

const TEXT_FONT: &str = "F1";
const TICK_FONT: &str = "F2";

/// ToUnicode CMap for the tick font. ZapfDingbats has no /Encoding entry,
/// so this is what lets extraction recover the check-mark code points from
/// the dingbat character codes.
const TICK_CMAP: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<00> <FF>
endcodespacerange
2 beginbfchar
<33> <2713>
<34> <2714>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

/// Render plain text into a one-or-more-page PDF.
pub fn text_to_pdf(title: &str, body: &str) -> Result<Vec<u8>, RenderError> {
    let lines = wrap_body(body);
    let lines_per_page = (((PAGE_HEIGHT as f32) - 2.0 * MARGIN) / LEADING) as usize;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let text_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let tick_cmap_id = doc.add_object(Stream::new(
        dictionary! {},
        TICK_CMAP.as_bytes().to_vec(),
    ));
    // No /Encoding entry: viewers use the ZapfDingbats built-in encoding.
    let tick_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "ZapfDingbats",
        "ToUnicode" => tick_cmap_id,
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            TEXT_FONT => text_font_id,
            TICK_FONT => tick_font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in pages_of(&lines, lines_per_page) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![TEXT_FONT.into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LEADING.into()]),
            Operation::new(
                "Td",
                vec![MARGIN.into(), ((PAGE_HEIGHT as f32) - MARGIN).into()],
            ),
        ];
        let mut active_font = TEXT_FONT;
        for line in page_lines {
            for run in encode_line(line) {
                let (font, bytes) = match run {
                    Run::Text(bytes) => (TEXT_FONT, bytes),
                    Run::Ticks(bytes) => (TICK_FONT, bytes),
                };
                if font != active_font {
                    operations.push(Operation::new("Tf", vec![font.into(), FONT_SIZE.into()]));
                    active_font = font;
                }
                operations.push(Operation::new("Tj", vec![Object::string_literal(bytes)]));
            }
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal("capa-portal"),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// A same-font stretch of one display line, already encoded for its font.
enum Run {
    Text(Vec<u8>),
    Ticks(Vec<u8>),
}

/// Split a line into font runs: tick glyphs go to ZapfDingbats, everything
/// else is WinAnsi-encoded for Helvetica with `?` standing in for code
/// points WinAnsi cannot carry.
fn encode_line(line: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for ch in line.chars() {
        match dingbat_byte(ch) {
            Some(byte) => match runs.last_mut() {
                Some(Run::Ticks(bytes)) => bytes.push(byte),
                _ => runs.push(Run::Ticks(vec![byte])),
            },
            None => {
                let byte = win_ansi_byte(ch).unwrap_or(b'?');
                match runs.last_mut() {
                    Some(Run::Text(bytes)) => bytes.push(byte),
                    _ => runs.push(Run::Text(vec![byte])),
                }
            }
        }
    }
    runs
}

fn dingbat_byte(ch: char) -> Option<u8> {
    match ch {
        '\u{2713}' => Some(0x33),
        '\u{2714}' => Some(0x34),
        _ => None,
    }
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    match u32::from(ch) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => Some(code as u8),
        // CP1252 additions in the 0x80..0x9F window.
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Split the body into display lines, wrapping long lines on whitespace.
/// A single word longer than the line limit is split at the limit.
fn wrap_body(body: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in body.lines() {
        if raw.chars().count() <= MAX_LINE_CHARS {
            lines.push(raw.to_string());
            continue;
        }
        let mut current = String::new();
        let mut current_chars = 0;
        for word in raw.split_whitespace() {
            let word_chars = word.chars().count();
            if word_chars > MAX_LINE_CHARS {
                if current_chars > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_chars = 0;
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(MAX_LINE_CHARS) {
                    if chunk.len() == MAX_LINE_CHARS {
                        lines.push(chunk.iter().collect());
                    } else {
                        current = chunk.iter().collect();
                        current_chars = chunk.len();
                    }
                }
                continue;
            }
            if current_chars > 0 && current_chars + 1 + word_chars > MAX_LINE_CHARS {
                lines.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            if current_chars > 0 {
                current.push(' ');
                current_chars += 1;
            }
            current.push_str(word);
            current_chars += word_chars;
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Chunk lines into pages; an empty body still yields one (blank) page.
fn pages_of(lines: &[String], lines_per_page: usize) -> Vec<&[String]> {
    if lines.is_empty() {
        return vec![&lines[..]];
    }
    lines.chunks(lines_per_page.max(1)).collect()
}
