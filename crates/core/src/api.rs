//! Typed client for the collection site's asset-metadata API.
//!
//! Sections expose their assets through a JSON API
//! (`/api/v4/collections/{collection}/sections/{section}/assets`); each
//! asset's downloadable attachments live behind a second endpoint. The
//! client follows page numbers until the server reports no next page.

use serde::Deserialize;
use url::Url;

use crate::fetch::Fetcher;
use crate::{ColligoError, Result};

/// Default origin for the asset API.
pub const DEFAULT_BASE_URL: &str = "https://brandfolder.com";

/// One media asset as returned by the section listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Opaque asset id, used to address the attachments endpoint.
    pub id: String,
    /// Asset metadata.
    pub attributes: AssetAttributes,
}

/// Metadata attributes of an [`Asset`].
#[derive(Debug, Clone, Deserialize)]
pub struct AssetAttributes {
    /// Display name; doubles as the slide caption for images.
    pub name: String,
    /// Lowercase file extension (`png`, `mp4`, ...).
    #[serde(default)]
    pub extension: String,
    /// Thumbnail URL; images are downloaded through [`view_url`] instead.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// One downloadable attachment of an asset.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Direct file URL.
    pub url: String,
    /// Attachment thumbnail, when the server provides one.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Envelope of a section asset listing page.
#[derive(Debug, Deserialize)]
struct AssetPage {
    data: Vec<Asset>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

/// Pagination hints; servers omit the whole object on single-page results.
#[derive(Debug, Deserialize)]
struct PageMeta {
    #[serde(default)]
    next_page: Option<u64>,
}

/// Envelope of the attachments endpoint.
#[derive(Debug, Deserialize)]
struct AttachmentList {
    data: Vec<AttachmentRecord>,
}

#[derive(Debug, Deserialize)]
struct AttachmentRecord {
    attributes: Attachment,
}

/// Client for the asset-metadata API of one collection site.
pub struct AssetClient<'a> {
    fetcher: &'a Fetcher,
    base_url: Url,
}

impl<'a> AssetClient<'a> {
    /// Creates a client against the default origin.
    pub fn new(fetcher: &'a Fetcher) -> Self {
        // DEFAULT_BASE_URL is a valid absolute URL
        Self { fetcher, base_url: Url::parse(DEFAULT_BASE_URL).unwrap() }
    }

    /// Creates a client against a custom origin.
    pub fn with_base_url(fetcher: &'a Fetcher, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Fetches every asset of a section, in position order.
    ///
    /// Follows `page[number]` pagination until the server reports no next
    /// page or answers with an empty page.
    pub async fn section_assets(&self, collection_key: &str, section_key: &str) -> Result<Vec<Asset>> {
        let mut assets = Vec::new();
        let mut page = 1;

        loop {
            let url = self.section_assets_url(collection_key, section_key, page)?;
            let response: AssetPage = self.fetcher.fetch_json(url.as_str()).await?;

            tracing::debug!(
                section = section_key,
                page = page,
                count = response.data.len(),
                "Fetched asset page"
            );

            if response.data.is_empty() {
                break;
            }
            assets.extend(response.data);

            match response.meta.and_then(|m| m.next_page) {
                // Guards against servers that echo the current page back.
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(assets)
    }

    /// Fetches the downloadable attachments of one asset.
    pub async fn attachments(&self, asset_id: &str) -> Result<Vec<Attachment>> {
        let url = self.attachments_url(asset_id)?;
        let response: AttachmentList = self.fetcher.fetch_json(url.as_str()).await?;

        Ok(response.data.into_iter().map(|record| record.attributes).collect())
    }

    /// Stable source id for a section's grouped content: its asset
    /// endpoint URL without pagination.
    pub fn section_source_id(&self, collection_key: &str, section_key: &str) -> Result<String> {
        Ok(self.section_endpoint(collection_key, section_key)?.to_string())
    }

    fn section_endpoint(&self, collection_key: &str, section_key: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("api/v4/collections/{}/sections/{}/assets", collection_key, section_key))
            .map_err(|e| ColligoError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("sort_by", "position")
            .append_pair("order", "ASC")
            .append_pair("fast_jsonapi", "true");

        Ok(url)
    }

    fn section_assets_url(&self, collection_key: &str, section_key: &str, page: u64) -> Result<Url> {
        let mut url = self.section_endpoint(collection_key, section_key)?;
        url.query_pairs_mut().append_pair("page[number]", &page.to_string());

        Ok(url)
    }

    fn attachments_url(&self, asset_id: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("api/v4/assets/{}/attachments", asset_id))
            .map_err(|e| ColligoError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut().append_pair("fields", "url,thumbnail_url");

        Ok(url)
    }
}

/// Rewrites a thumbnail URL to its full-resolution variant.
///
/// Section listings only carry `element.png` thumbnails; the site serves
/// the print-quality rendition under `view@2x.png` at the same path.
pub fn view_url(thumbnail_url: &str) -> String {
    thumbnail_url.replace("element.png", "view@2x.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchConfig;

    const ASSET_PAGE: &str = r#"{
        "data": [
            {
                "id": "asset-1",
                "attributes": {
                    "name": "Wash your hands",
                    "extension": "png",
                    "thumbnail_url": "https://cdn.example.com/a1/element.png"
                }
            },
            {
                "id": "asset-2",
                "attributes": {
                    "name": "How masks work",
                    "extension": "mp4",
                    "thumbnail_url": "https://cdn.example.com/a2/element.png"
                }
            }
        ],
        "meta": {"current_page": 1, "next_page": null, "total_pages": 1}
    }"#;

    const ATTACHMENTS: &str = r#"{
        "data": [
            {
                "id": "att-1",
                "attributes": {
                    "url": "https://cdn.example.com/videos/masks.mp4",
                    "thumbnail_url": "https://cdn.example.com/videos/masks-thumb.png"
                }
            }
        ]
    }"#;

    #[test]
    fn test_asset_page_deserialization() {
        let page: AssetPage = serde_json::from_str(ASSET_PAGE).unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, "asset-1");
        assert_eq!(page.data[0].attributes.extension, "png");
        assert_eq!(page.data[1].attributes.name, "How masks work");
        assert_eq!(page.meta.unwrap().next_page, None);
    }

    #[test]
    fn test_asset_page_without_meta() {
        let page: AssetPage = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(page.data.is_empty());
        assert!(page.meta.is_none());
    }

    #[test]
    fn test_asset_tolerates_unknown_fields() {
        let json = r#"{
            "data": [{
                "id": "x",
                "type": "assets",
                "attributes": {"name": "n", "extension": "png", "approved": true, "position": 3}
            }]
        }"#;
        let page: AssetPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data[0].attributes.name, "n");
    }

    #[test]
    fn test_attachment_deserialization() {
        let list: AttachmentList = serde_json::from_str(ATTACHMENTS).unwrap();

        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].attributes.url, "https://cdn.example.com/videos/masks.mp4");
        assert_eq!(
            list.data[0].attributes.thumbnail_url.as_deref(),
            Some("https://cdn.example.com/videos/masks-thumb.png")
        );
    }

    #[test]
    fn test_section_assets_url() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let client = AssetClient::new(&fetcher);
        let url = client.section_assets_url("coll-key", "sec-key", 2).unwrap();

        assert!(url.as_str().starts_with("https://brandfolder.com/api/v4/collections/coll-key/sections/sec-key/assets"));
        assert!(url.query().unwrap().contains("sort_by=position"));
        assert!(url.query().unwrap().contains("order=ASC"));
        assert!(url.query().unwrap().contains("fast_jsonapi=true"));
        assert!(url.query().unwrap().contains("2"));
    }

    #[test]
    fn test_section_source_id_has_no_page() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let client = AssetClient::new(&fetcher);
        let id = client.section_source_id("coll-key", "sec-key").unwrap();

        assert!(id.contains("/collections/coll-key/sections/sec-key/assets"));
        assert!(!id.contains("page"));
    }

    #[test]
    fn test_attachments_url() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let client = AssetClient::new(&fetcher);
        let url = client.attachments_url("asset-9").unwrap();

        assert!(url.as_str().starts_with("https://brandfolder.com/api/v4/assets/asset-9/attachments"));
        assert_eq!(url.query(), Some("fields=url%2Cthumbnail_url"));
    }

    #[test]
    fn test_view_url_rewrite() {
        assert_eq!(
            view_url("https://cdn.example.com/a1/element.png"),
            "https://cdn.example.com/a1/view@2x.png"
        );
        // URLs without the thumbnail suffix pass through untouched
        assert_eq!(view_url("https://cdn.example.com/a1/full.png"), "https://cdn.example.com/a1/full.png");
    }
}
