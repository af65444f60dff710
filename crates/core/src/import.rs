//! The import pipeline: two source adapters feeding one channel.
//!
//! The English collection page lists topic sections whose assets become
//! nested slideshow and video nodes. The multi-language page lists one
//! section per language, each becoming a channel-level slideshow. Both
//! adapters share the landing-page scraper, the asset API client, and the
//! slideshow packaging in [`crate::slideshow`].

use std::path::PathBuf;

use crate::api::{self, Asset, AssetClient};
use crate::collection::{CollectionPage, Section};
use crate::fetch::Fetcher;
use crate::languages::{Language, display_title};
use crate::nodes::{Channel, ContentNode, License, Slide, TopicNode, VideoNode};
use crate::slideshow::{SlideshowMode, SlideshowSpec};
use crate::{ColligoError, Result};

/// Configuration for one import run.
///
/// Defaults describe the health-education collections the importer was
/// built for; every field can be overridden for other deployments of the
/// same site software.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// English collection landing page.
    pub english_collection_url: String,
    /// Multi-language slideshow collection landing page.
    pub slideshows_url: String,
    /// Section ids excluded from the English collection.
    pub excluded_section_ids: Vec<u64>,
    /// Directory where assembled PDFs are cached.
    pub documents_dir: PathBuf,
    /// Native slideshow nodes or PDF documents.
    pub mode: SlideshowMode,
    /// Only import this language (by section name) from the
    /// multi-language collection.
    pub language_filter: Option<String>,
    /// Rights holder stamped on every imported node.
    pub copyright_holder: String,
    pub channel_title: String,
    pub channel_source_id: String,
    pub channel_domain: String,
    pub channel_language: String,
    pub channel_description: String,
    pub channel_thumbnail_url: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            english_collection_url: "https://brandfolder.com/digitalmedic/covid-19".to_string(),
            slideshows_url: "https://brandfolder.com/digitalmedic/covid-19-multiple-languages".to_string(),
            excluded_section_ids: vec![262354, 261412],
            documents_dir: PathBuf::from("documents"),
            mode: SlideshowMode::default(),
            language_filter: None,
            copyright_holder: "Stanford Center for Health Education".to_string(),
            channel_title: "Stanford Digital Medic".to_string(),
            channel_source_id: "stanford-digital-medic".to_string(),
            channel_domain: "digitalmedic.stanford.edu".to_string(),
            channel_language: "en".to_string(),
            channel_description: "From the Stanford Center for Health Education, these infographics and \
                                  visual materials provide key information on high-priority topics related \
                                  to the prevention and understanding of COVID-19."
                .to_string(),
            channel_thumbnail_url: "https://digitalmedic.stanford.edu/wp-content/uploads/logo_horizontal.png"
                .to_string(),
        }
    }
}

impl ImportConfig {
    fn license(&self) -> License {
        License::cc_by_sa(&self.copyright_holder)
    }

    /// Channel root with metadata from this config and no children yet.
    pub fn channel_skeleton(&self) -> Channel {
        Channel {
            source_domain: self.channel_domain.clone(),
            source_id: self.channel_source_id.clone(),
            title: self.channel_title.clone(),
            description: self.channel_description.clone(),
            language: self.channel_language.clone(),
            thumbnail_url: self.channel_thumbnail_url.clone(),
            children: Vec::new(),
        }
    }
}

/// What one asset contributes to its section.
#[derive(Debug)]
enum AssetKind<'a> {
    /// A slide for the section's slideshow.
    Image(Slide),
    /// A video node, pending its attachment lookup.
    Video(&'a Asset),
    /// Anything the importer does not handle.
    Unsupported(&'a str),
}

/// Branches on the asset's file extension.
fn classify(asset: &Asset) -> AssetKind<'_> {
    match asset.attributes.extension.as_str() {
        "png" => match &asset.attributes.thumbnail_url {
            Some(thumbnail_url) => AssetKind::Image(Slide {
                url: api::view_url(thumbnail_url),
                caption: Some(asset.attributes.name.clone()),
            }),
            None => AssetKind::Unsupported("png without thumbnail"),
        },
        "mp4" => AssetKind::Video(asset),
        other => AssetKind::Unsupported(other),
    }
}

/// Runs both adapters and returns the validated channel.
pub async fn build_channel(fetcher: &Fetcher, config: &ImportConfig) -> Result<Channel> {
    let mut channel = config.channel_skeleton();

    import_english_collection(fetcher, config, &mut channel).await?;
    import_multilanguage_slideshows(fetcher, config, &mut channel).await?;

    channel.validate()?;
    Ok(channel)
}

/// Imports the English collection: one topic node per section, holding
/// video nodes and one slideshow for the section's images.
pub async fn import_english_collection(fetcher: &Fetcher, config: &ImportConfig, channel: &mut Channel) -> Result<()> {
    tracing::info!(url = %config.english_collection_url, "Importing English collection");

    let html = fetcher.fetch_text(&config.english_collection_url).await?;
    // Parsed HTML is not Send; pull out what we need before any await.
    let (collection_key, sections) = {
        let page = CollectionPage::parse(&html);
        (page.collection_key()?, page.sections()?)
    };
    let client = AssetClient::new(fetcher);

    for section in sections {
        if config.excluded_section_ids.contains(&section.id) {
            tracing::debug!(section = %section.name, "Section excluded");
            continue;
        }
        tracing::info!(topic = %section.name, "Importing topic");

        let mut topic = TopicNode {
            source_id: section.section_key.clone(),
            title: section.name.clone(),
            children: Vec::new(),
        };
        import_section_assets(fetcher, &client, config, &collection_key, &section, &mut topic).await?;

        if topic.children.is_empty() {
            tracing::warn!(topic = %topic.title, "Topic has no importable assets, skipping");
            continue;
        }
        channel.add_child(ContentNode::Topic(topic));
    }

    Ok(())
}

/// Fills a topic with the nodes of one section.
async fn import_section_assets(
    fetcher: &Fetcher, client: &AssetClient<'_>, config: &ImportConfig, collection_key: &str, section: &Section,
    topic: &mut TopicNode,
) -> Result<()> {
    let assets = client.section_assets(collection_key, &section.section_key).await?;
    let mut slides = Vec::new();

    for asset in &assets {
        match classify(asset) {
            AssetKind::Image(slide) => slides.push(slide),
            AssetKind::Video(asset) => {
                let attachments = client.attachments(&asset.id).await?;
                let video = attachments.first().ok_or_else(|| {
                    ColligoError::UnexpectedPayload(format!("asset {} has no attachments", asset.id))
                })?;

                topic.children.push(ContentNode::Video(VideoNode {
                    source_id: video.url.clone(),
                    title: asset.attributes.name.clone(),
                    license: config.license(),
                    url: video.url.clone(),
                    thumbnail_url: video.thumbnail_url.clone(),
                }));
            }
            AssetKind::Unsupported(extension) => {
                tracing::warn!(
                    extension = extension,
                    asset = %asset.attributes.name,
                    section = %section.name,
                    "Unable to add asset"
                );
            }
        }
    }

    if !slides.is_empty() {
        let spec = SlideshowSpec {
            source_id: client.section_source_id(collection_key, &section.section_key)?,
            title: topic.title.clone(),
            language: Language::lookup("English").map(|lang| lang.code.to_string()),
            license: config.license(),
            slides,
        };
        topic.children.push(spec.build(fetcher, &config.documents_dir, config.mode).await?);
    }

    Ok(())
}

/// Imports the multi-language collection: one channel-level slideshow per
/// language section, titled with the language's native name.
pub async fn import_multilanguage_slideshows(
    fetcher: &Fetcher, config: &ImportConfig, channel: &mut Channel,
) -> Result<()> {
    tracing::info!(url = %config.slideshows_url, "Importing multi-language content");

    let html = fetcher.fetch_text(&config.slideshows_url).await?;
    let (collection_key, sections) = {
        let page = CollectionPage::parse(&html);
        (page.collection_key()?, page.sections()?)
    };
    let client = AssetClient::new(fetcher);

    for section in sections {
        if let Some(filter) = &config.language_filter
            && filter != &section.name
        {
            continue;
        }

        let assets = client.section_assets(&collection_key, &section.section_key).await?;
        let slides: Vec<Slide> = assets
            .iter()
            .filter_map(|asset| asset.attributes.thumbnail_url.as_deref())
            .map(|thumbnail_url| Slide { url: api::view_url(thumbnail_url), caption: None })
            .collect();

        if slides.is_empty() {
            tracing::debug!(language = %section.name, "Language section has no slides, skipping");
            continue;
        }

        let title = display_title(&section.name);
        tracing::info!(language = %title, slides = slides.len(), "Importing slideshow");

        let spec = SlideshowSpec {
            source_id: client.section_source_id(&collection_key, &section.section_key)?,
            title,
            language: Language::lookup(&section.name).map(|lang| lang.code.to_string()),
            license: config.license(),
            slides,
        };
        channel.add_child(spec.build(fetcher, &config.documents_dir, config.mode).await?);
    }

    Ok(())
}
