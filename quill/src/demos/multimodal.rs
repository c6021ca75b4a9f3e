//! Multimodal demos: PDF text analysis, PDF visual analysis, image
//! analysis
//!
//! An unreadable source yields an empty conversation and the gateway call
//! is skipped; the suite continues with the next demo.

use std::path::Path;

use quill_docs::{RasterOptions, encode_image, extract_text, rasterize_pages};
use quill_llm::{CompletionRequest, Conversation, Gateway};

use super::report;
use crate::console::Console;

/// Vision-capable model used by this suite
const MODEL: &str = "gpt-4.1-mini";

/// Run all multimodal demos
pub async fn run(console: &mut Console, gateway: &Gateway, pdf: &Path, image: &Path) {
    console.header("PDF Text Analysis");
    let result = pdf_text_analysis(console, gateway, pdf).await;
    report(console, "pdf_text_analysis", result);

    console.header("PDF Visual Analysis");
    let result = pdf_visual_analysis(console, gateway, pdf).await;
    report(console, "pdf_visual_analysis", result);

    console.header("Image Analysis");
    let result = image_analysis(console, gateway, image).await;
    report(console, "image_analysis", result);
}

/// Send the completion unless the source produced an empty conversation
async fn analyze(
    console: &mut Console,
    gateway: &Gateway,
    conversation: Conversation,
) -> anyhow::Result<()> {
    if conversation.is_empty() {
        console.line("source unavailable, skipping analysis");
        return Ok(());
    }

    let request = CompletionRequest::deterministic(MODEL, 0.0);
    let completion = gateway.complete(&conversation, &request).await?;
    console.line(completion.text().unwrap_or_default());
    Ok(())
}

/// Analyze extracted text, bounded to the document character budget
async fn pdf_text_analysis(
    console: &mut Console,
    gateway: &Gateway,
    pdf: &Path,
) -> anyhow::Result<()> {
    console.line(format!("Extracting text from: {}", pdf.display()));

    let conversation = match extract_text(pdf) {
        Ok(text) => Conversation::document_text(&pdf.display().to_string(), &text),
        Err(e) => {
            console.line(format!("could not extract text: {e}"));
            Conversation::new()
        }
    };

    analyze(console, gateway, conversation).await
}

/// Analyze rasterized pages, bounded by the page ceiling
async fn pdf_visual_analysis(
    console: &mut Console,
    gateway: &Gateway,
    pdf: &Path,
) -> anyhow::Result<()> {
    console.line(format!("Converting PDF pages to images: {}", pdf.display()));

    let conversation = match rasterize_pages(pdf, RasterOptions::default()) {
        Ok(document) => {
            if document.skipped_pages > 0 {
                console.line(format!(
                    "limited to first {} pages ({} skipped)",
                    document.pages.len(),
                    document.skipped_pages
                ));
            }
            if document.failed_pages > 0 {
                console.line(format!("{} pages failed to render", document.failed_pages));
            }
            Conversation::document_pages(&pdf.display().to_string(), &document.data_urls())
        }
        Err(e) => {
            console.line(format!("could not rasterize pages: {e}"));
            Conversation::new()
        }
    };

    analyze(console, gateway, conversation).await
}

/// Describe a single encoded image
async fn image_analysis(
    console: &mut Console,
    gateway: &Gateway,
    image: &Path,
) -> anyhow::Result<()> {
    console.line(format!("Analyzing image: {}", image.display()));

    let conversation = match encode_image(image) {
        Ok(data_url) => Conversation::image(&image.display().to_string(), &data_url),
        Err(e) => {
            console.line(format!("could not encode image: {e}"));
            Conversation::new()
        }
    };

    analyze(console, gateway, conversation).await
}
