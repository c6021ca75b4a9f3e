//! Document preprocessing for multimodal analysis
//!
//! Turns a document or image on disk into something a conversation can
//! embed: extracted plain text with page markers, a bounded sequence of
//! rasterized page images, or a single base64 data URL.

pub mod error;
pub mod image;
pub mod raster;
pub mod text;

pub use error::DocError;
pub use image::encode_image;
pub use raster::{PageImage, RasterOptions, RasterizedDocument, rasterize_pages};
pub use text::extract_text;
