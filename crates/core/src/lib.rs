pub mod api;
pub mod collection;
pub mod error;
pub mod fetch;
pub mod import;
pub mod languages;
pub mod nodes;
pub mod package;
pub mod pdf;
pub mod slideshow;

pub use api::{Asset, AssetAttributes, AssetClient, Attachment, DEFAULT_BASE_URL, view_url};
pub use collection::{CollectionPage, Section};
pub use error::{ColligoError, Result};
pub use fetch::{FetchConfig, Fetcher};
pub use import::{ImportConfig, build_channel, import_english_collection, import_multilanguage_slideshows};
pub use languages::{Language, display_title};
pub use nodes::{
    Channel, ChannelSummary, ContentNode, DocumentNode, License, LicenseKind, Slide, SlideshowNode, TopicNode,
    VideoNode,
};
pub use package::{FILES_DIR, MANIFEST_NAME, PackageReport, write_package};
#[doc(hidden)]
pub use pdf::{PdfPage, assemble_pdf};
pub use slideshow::{SlideshowMode, SlideshowSpec, document_path};
