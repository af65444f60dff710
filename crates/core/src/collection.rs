//! Collection landing-page scraping.
//!
//! A collection page embeds everything the importer needs to address the
//! asset API: a `resource_key` inside an inline `var SOURCE = {...}`
//! script, and the list of sections inside the asset-list element's
//! `data-react-props` attribute.
//!
//! # Example
//!
//! ```rust
//! use colligo_core::collection::CollectionPage;
//!
//! let html = r#"
//!     <script>var SOURCE = {id: 1, resource_key: "abc123", type: "collection"};</script>
//!     <div class="asset-list"><div data-react-props='{"sections":[]}'></div></div>
//! "#;
//!
//! let page = CollectionPage::parse(html);
//! assert_eq!(page.collection_key().unwrap(), "abc123");
//! ```

use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::{ColligoError, Result};

/// One section of a collection, as advertised by the landing page.
///
/// On the English collection, sections are topics; on the multi-language
/// collection, sections are languages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    /// Numeric section id (used for exclusion filters).
    pub id: u64,
    /// Human-readable section name.
    pub name: String,
    /// Key addressing this section in the asset API.
    pub section_key: String,
}

/// Internal shape of the asset-list element's react props.
#[derive(Debug, Deserialize)]
struct AssetListProps {
    sections: Vec<Section>,
}

/// A parsed collection landing page.
///
/// Wraps the parsed HTML and exposes the two pieces of embedded JSON the
/// importer needs: the collection key and the section list.
pub struct CollectionPage {
    html: Html,
}

impl CollectionPage {
    /// Parses a collection page from its HTML source.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Extracts the collection `resource_key` from the inline source script.
    ///
    /// # Errors
    ///
    /// Returns [`ColligoError::MissingCollectionKey`] when no inline script
    /// declares a `var SOURCE` object with a `resource_key`.
    pub fn collection_key(&self) -> Result<String> {
        let re = Regex::new(r#"(?s)var SOURCE\s*=\s*\{.*?resource_key:\s*"([^"]+)""#).unwrap();

        let selector = Selector::parse("script").map_err(|e| ColligoError::HtmlParseError(e.to_string()))?;
        for script in self.html.select(&selector) {
            let text: String = script.text().collect();
            if let Some(captures) = re.captures(&text) {
                return Ok(captures[1].to_string());
            }
        }

        Err(ColligoError::MissingCollectionKey)
    }

    /// Returns the sections advertised by the asset-list element.
    ///
    /// The section list lives in the `data-react-props` attribute of the
    /// first `div` inside `div.asset-list`; scraper unescapes the attribute
    /// before we decode it as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ColligoError::HtmlParseError`] when the asset-list element
    /// is absent and [`ColligoError::JsonError`] when the props do not
    /// decode.
    pub fn sections(&self) -> Result<Vec<Section>> {
        let selector =
            Selector::parse("div.asset-list div").map_err(|e| ColligoError::HtmlParseError(e.to_string()))?;

        let props = self
            .html
            .select(&selector)
            .find_map(|el| el.value().attr("data-react-props"))
            .ok_or_else(|| ColligoError::HtmlParseError("page has no asset-list props".to_string()))?;

        let props: AssetListProps = serde_json::from_str(props)?;
        Ok(props.sections)
    }
}
