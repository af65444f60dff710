//! Slideshow packaging: native slideshow nodes or PDF documents.
//!
//! Grouped images leave the importer one of two ways. In slides mode the
//! node carries the ordered image URLs directly. In document mode (the
//! default) every image is downloaded, converted to RGB, JPEG-encoded and
//! appended to a PDF; the PDF is cached on disk under the md5 of the
//! slideshow's source id and never rebuilt while the file exists.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;

use crate::fetch::Fetcher;
use crate::nodes::{ContentNode, DocumentNode, License, Slide, SlideshowNode};
use crate::pdf::{self, PdfPage};
use crate::{ColligoError, Result};

/// JPEG quality for PDF pages.
const JPEG_QUALITY: u8 = 90;

/// How grouped images are packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideshowMode {
    /// Emit native slideshow nodes.
    Slides,
    /// Flatten each slideshow into a PDF document node.
    #[default]
    Document,
}

/// Cache path of a slideshow PDF inside `documents_dir`.
///
/// The filename is the md5 of the slideshow's source id, so re-runs with
/// the same source find their earlier output.
pub fn document_path(documents_dir: &Path, source_id: &str) -> PathBuf {
    let digest = md5::compute(source_id.as_bytes());
    documents_dir.join(format!("{:x}.pdf", digest))
}

/// Everything needed to package one slideshow.
#[derive(Debug, Clone)]
pub struct SlideshowSpec {
    pub source_id: String,
    pub title: String,
    /// Language code, when the slideshow's language is known.
    pub language: Option<String>,
    pub license: License,
    /// Slides in presentation order; must not be empty.
    pub slides: Vec<Slide>,
}

impl SlideshowSpec {
    /// Packages the slideshow according to `mode`.
    pub async fn build(self, fetcher: &Fetcher, documents_dir: &Path, mode: SlideshowMode) -> Result<ContentNode> {
        match mode {
            SlideshowMode::Slides => self.into_slideshow_node(),
            SlideshowMode::Document => self.into_document_node(fetcher, documents_dir).await,
        }
    }

    /// Emits a native slideshow node; the first slide doubles as the
    /// thumbnail.
    pub fn into_slideshow_node(self) -> Result<ContentNode> {
        let thumbnail_url = self.thumbnail_url()?;

        Ok(ContentNode::Slideshow(SlideshowNode {
            source_id: self.source_id,
            title: self.title,
            language: self.language,
            license: self.license,
            thumbnail_url,
            slides: self.slides,
        }))
    }

    /// Flattens the slideshow into a PDF document node.
    ///
    /// When the cache file already exists on disk, neither downloads nor
    /// encoding happen again.
    pub async fn into_document_node(self, fetcher: &Fetcher, documents_dir: &Path) -> Result<ContentNode> {
        let thumbnail_url = self.thumbnail_url()?;
        let path = document_path(documents_dir, &self.source_id);

        if path.exists() {
            tracing::debug!(path = %path.display(), "Reusing existing document");
        } else {
            fs::create_dir_all(documents_dir)?;

            let mut pages = Vec::with_capacity(self.slides.len());
            for slide in &self.slides {
                let bytes = fetcher.fetch_bytes(&slide.url).await?;
                pages.push(encode_page(&bytes)?);
            }

            pdf::assemble_pdf(&pages, &path)?;
            tracing::debug!(path = %path.display(), pages = pages.len(), "Assembled document");
        }

        Ok(ContentNode::Document(DocumentNode {
            source_id: self.source_id,
            title: self.title,
            language: self.language,
            license: self.license,
            thumbnail_url,
            path,
            digest: None,
        }))
    }

    fn thumbnail_url(&self) -> Result<String> {
        match self.slides.first() {
            Some(first) => Ok(first.url.clone()),
            None => Err(ColligoError::InvalidChannel(format!("slideshow {} has no slides", self.source_id))),
        }
    }
}

/// Decodes image bytes and re-encodes them as an RGB JPEG page.
///
/// RGBA and paletted sources are converted to RGB first; JPEG has no
/// alpha channel.
fn encode_page(bytes: &[u8]) -> Result<PdfPage> {
    let img = image::load_from_memory(bytes)?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;

    Ok(PdfPage { jpeg, width, height })
}
