//! Image file encoding for inline attachments

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::DocError;

/// Encode an image file as a base64 data URL
///
/// Media type is taken from the file extension (png, jpg/jpeg, gif),
/// defaulting to PNG when unclear.
///
/// # Errors
///
/// Returns [`DocError::SourceNotFound`] for a missing file and
/// [`DocError::SourceUnavailable`] when the file cannot be read.
pub fn encode_image(path: &Path) -> Result<String, DocError> {
    let bytes = crate::text::read_source(path)?;
    let media_type = media_type_for(path);
    Ok(format!("data:{media_type};base64,{}", BASE64.encode(&bytes)))
}

/// Media type from the file extension
fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_determines_media_type() {
        assert_eq!(media_type_for(Path::new("a.png")), "image/png");
        assert_eq!(media_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.gif")), "image/gif");
        assert_eq!(media_type_for(Path::new("a.webp")), "image/png");
        assert_eq!(media_type_for(Path::new("noext")), "image/png");
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = encode_image(Path::new("/nonexistent/picture.png")).unwrap_err();
        assert!(matches!(err, DocError::SourceNotFound { .. }));
    }

    #[test]
    fn encoded_file_is_a_data_url() {
        let dir = std::env::temp_dir().join(format!("quill-docs-image-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pixel.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let data_url = encode_image(&path).unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));

        std::fs::remove_file(&path).ok();
    }
}
