//! Plain-text extraction from PDF documents

use std::path::Path;

use crate::error::DocError;

/// Extract text from every page, each demarcated by a page-number marker
///
/// # Errors
///
/// Returns [`DocError::SourceNotFound`] for a missing file and
/// [`DocError::SourceUnavailable`] when the document yields no extractable
/// text or the extractor fails.
pub fn extract_text(path: &Path) -> Result<String, DocError> {
    let bytes = read_source(path)?;

    // pdf-extract (via its font handling) can panic on malformed glyph
    // data, so the call is isolated behind catch_unwind.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes))
        .map_err(|_| DocError::SourceUnavailable("text extractor panicked".to_owned()))?
        .map_err(|e| DocError::SourceUnavailable(e.to_string()))?;

    if pages.iter().all(|page| page.trim().is_empty()) {
        return Err(DocError::SourceUnavailable(format!(
            "no text could be extracted from {}",
            path.display()
        )));
    }

    let mut text = String::new();
    for (index, page) in pages.iter().enumerate() {
        text.push_str(&format!("\n--- Page {} ---\n", index + 1));
        text.push_str(page);
    }

    Ok(text.trim().to_owned())
}

/// Read a source file, distinguishing a missing file from a read failure
pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>, DocError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DocError::SourceNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(DocError::SourceUnavailable(e.to_string())),
    }
}
