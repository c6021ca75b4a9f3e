//! PDF page rasterization
//!
//! Pages become PNG data URLs suitable for inline image attachments. The
//! page ceiling bounds the payload sent downstream; per-page render
//! failures are skipped with a warning rather than failing the document.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;
use pdfium_render::prelude::{PdfRenderConfig, Pdfium};

use crate::error::DocError;

/// Rasterization parameters
#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    /// Render resolution
    pub dpi: f32,
    /// Page ceiling; pages beyond it are skipped and counted
    pub max_pages: usize,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            max_pages: 3,
        }
    }
}

/// A single rasterized page
#[derive(Debug, Clone)]
pub struct PageImage {
    /// One-based page number
    pub page_number: usize,
    /// PNG image as a base64 data URL
    pub data_url: String,
}

/// Result of rasterizing a document
#[derive(Debug, Clone, Default)]
pub struct RasterizedDocument {
    /// Rendered pages, in document order
    pub pages: Vec<PageImage>,
    /// Pages beyond the ceiling that were not attempted
    pub skipped_pages: usize,
    /// Pages that failed to render and were skipped
    pub failed_pages: usize,
}

impl RasterizedDocument {
    /// Data URLs of the rendered pages, in order
    #[must_use]
    pub fn data_urls(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.data_url.clone()).collect()
    }
}

/// Rasterize up to `max_pages` pages of a PDF at the configured DPI
///
/// # Errors
///
/// Returns [`DocError::SourceNotFound`] for a missing file and
/// [`DocError::SourceUnavailable`] when the document cannot be opened or
/// no page renders successfully.
pub fn rasterize_pages(path: &Path, options: RasterOptions) -> Result<RasterizedDocument, DocError> {
    let bytes = crate::text::read_source(path)?;

    let pdfium = Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| DocError::SourceUnavailable(format!("pdfium unavailable: {e}")))?;

    let document = pdfium
        .load_pdf_from_byte_slice(&bytes, None)
        .map_err(|e| DocError::SourceUnavailable(format!("failed to open PDF: {e}")))?;

    let total_pages = usize::from(document.pages().len());
    let (render_count, skipped_pages) = page_budget(total_pages, options.max_pages);

    let scale = options.dpi / 72.0;
    let config = PdfRenderConfig::new().scale_page_by_factor(scale);

    let mut result = RasterizedDocument {
        skipped_pages,
        ..RasterizedDocument::default()
    };

    for (index, page) in document.pages().iter().take(render_count).enumerate() {
        let page_number = index + 1;
        match render_page_png(&page, &config) {
            Ok(png) => {
                let data_url = format!("data:image/png;base64,{}", BASE64.encode(&png));
                result.pages.push(PageImage { page_number, data_url });
                tracing::debug!(page = page_number, total = render_count, "rasterized page");
            }
            Err(reason) => {
                result.failed_pages += 1;
                tracing::warn!(page = page_number, %reason, "skipping unrenderable page");
            }
        }
    }

    if skipped_pages > 0 {
        tracing::info!(
            rendered = result.pages.len(),
            skipped = skipped_pages,
            "page ceiling reached"
        );
    }

    if result.pages.is_empty() {
        return Err(DocError::SourceUnavailable(format!(
            "no pages could be rasterized from {}",
            path.display()
        )));
    }

    Ok(result)
}

/// Split a page count into pages to render and pages beyond the ceiling
///
/// Every page is accounted for: rendered plus skipped equals the total.
fn page_budget(total: usize, max_pages: usize) -> (usize, usize) {
    let render = total.min(max_pages);
    (render, total - render)
}

/// Render one page to PNG bytes
fn render_page_png(
    page: &pdfium_render::prelude::PdfPage<'_>,
    config: &PdfRenderConfig,
) -> Result<Vec<u8>, String> {
    let bitmap = page
        .render_with_config(config)
        .map_err(|e| format!("render failed: {e}"))?;

    let image = bitmap.as_image();
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| format!("PNG encode failed: {e}"))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_source_not_found() {
        let err = rasterize_pages(Path::new("/nonexistent/report.pdf"), RasterOptions::default())
            .unwrap_err();
        assert!(matches!(err, DocError::SourceNotFound { .. }));
    }

    #[test]
    fn ceiling_bounds_rendered_pages_and_counts_the_rest() {
        assert_eq!(page_budget(10, 3), (3, 7));
        assert_eq!(page_budget(4, 3), (3, 1));
    }

    #[test]
    fn short_documents_render_every_page() {
        assert_eq!(page_budget(3, 3), (3, 0));
        assert_eq!(page_budget(2, 3), (2, 0));
        assert_eq!(page_budget(0, 3), (0, 0));
    }

    #[test]
    fn budget_accounts_for_every_page() {
        for total in 0..20 {
            let (rendered, skipped) = page_budget(total, 3);
            assert_eq!(rendered + skipped, total);
            assert!(rendered <= 3);
        }
    }

    #[test]
    fn default_ceiling_is_small() {
        let options = RasterOptions::default();
        assert_eq!(options.max_pages, 3);
        assert!((options.dpi - 150.0).abs() < f32::EPSILON);
    }
}
