//! Multi-page PDF assembly from JPEG page images.
//!
//! Each page embeds one JPEG unchanged as a DCTDecode image XObject drawn
//! over the full page. The media box keeps the source pixel size at
//! 72 dpi; nothing is resampled.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::Result;

/// One prepared PDF page: JPEG bytes plus pixel dimensions.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// JPEG-encoded RGB image data.
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Writes a PDF with one page per image to `path`.
///
/// # Errors
///
/// Returns an error when `pages` is empty, when content streams fail to
/// encode, or when the file cannot be written.
pub fn assemble_pdf(pages: &[PdfPage], path: &Path) -> Result<()> {
    if pages.is_empty() {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "no pages to assemble").into());
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for page in pages {
        let width = page.width as i64;
        let height = page.height as i64;

        // JPEG data passes through untouched; DCTDecode is the codec.
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            page.jpeg.clone(),
        )
        .with_compression(false);
        let image_id = doc.add_object(image);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Integer(width),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(height),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    }));

    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)?;

    Ok(())
}
