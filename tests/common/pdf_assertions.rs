use lopdf::Document as LopdfDocument;

/// Extract text content from a PDF, page by page.
pub fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<String, Box<dyn std::error::Error>> {
    let doc = LopdfDocument::load_mem(pdf_bytes)?;
    let mut text = String::new();

    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        match doc.extract_text(&[page_num as u32]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not extract text from page {}: {}",
                    page_num, e
                );
            }
        }
    }

    Ok(text)
}

/// The document title from the PDF Info dictionary, if present.
pub fn pdf_title(pdf_bytes: &[u8]) -> Option<String> {
    let doc = LopdfDocument::load_mem(pdf_bytes).ok()?;
    let info = doc.trailer.get(b"Info").ok()?;
    let info = match info {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let title = info.as_dict().ok()?.get(b"Title").ok()?;
    let bytes = title.as_str().ok()?;
    Some(String::from_utf8_lossy(bytes).to_string())
}

pub fn assert_is_pdf(pdf_bytes: &[u8]) {
    assert!(
        pdf_bytes.starts_with(b"%PDF-"),
        "output does not start with a PDF header"
    );
}

pub fn page_count(pdf_bytes: &[u8]) -> usize {
    LopdfDocument::load_mem(pdf_bytes)
        .map(|doc| doc.get_pages().len())
        .unwrap_or(0)
}
