//! Channel tree model: the importable content-node hierarchy.
//!
//! A [`Channel`] is the root container of one importable package. Its
//! children are [`ContentNode`]s: topics (grouping folders), slideshows,
//! documents, and videos. Nesting is at most two levels deep — topics sit
//! directly under the channel and hold only leaf nodes.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::{ColligoError, Result};

/// License identifier carried by every leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LicenseKind {
    /// Creative Commons Attribution-ShareAlike.
    #[serde(rename = "CC BY-SA")]
    CcBySa,
}

/// A content license with its rights holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub kind: LicenseKind,
    pub copyright_holder: String,
}

impl License {
    /// Creates a CC BY-SA license for the given holder.
    pub fn cc_by_sa(copyright_holder: &str) -> Self {
        Self { kind: LicenseKind::CcBySa, copyright_holder: copyright_holder.to_string() }
    }
}

/// One image of a slideshow, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// Full-resolution image URL.
    pub url: String,
    /// Optional caption shown with the slide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A grouping folder under the channel.
#[derive(Debug, Clone, Serialize)]
pub struct TopicNode {
    pub source_id: String,
    pub title: String,
    pub children: Vec<ContentNode>,
}

/// An ordered sequence of images packaged as a native slideshow.
#[derive(Debug, Clone, Serialize)]
pub struct SlideshowNode {
    pub source_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub license: License,
    /// Thumbnail URL (the first slide).
    pub thumbnail_url: String,
    pub slides: Vec<Slide>,
}

/// A slideshow flattened into a local PDF document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentNode {
    pub source_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub license: License,
    pub thumbnail_url: String,
    /// Path of the assembled PDF on disk.
    pub path: PathBuf,
    /// sha256 of the PDF, filled in when the package is written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// A single video with a remote file URL.
#[derive(Debug, Clone, Serialize)]
pub struct VideoNode {
    pub source_id: String,
    pub title: String,
    pub license: License,
    /// Remote video file URL.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// A node of the output content tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    Topic(TopicNode),
    Slideshow(SlideshowNode),
    Document(DocumentNode),
    Video(VideoNode),
}

impl ContentNode {
    /// Source id of this node.
    pub fn source_id(&self) -> &str {
        match self {
            ContentNode::Topic(n) => &n.source_id,
            ContentNode::Slideshow(n) => &n.source_id,
            ContentNode::Document(n) => &n.source_id,
            ContentNode::Video(n) => &n.source_id,
        }
    }

    /// Display title of this node.
    pub fn title(&self) -> &str {
        match self {
            ContentNode::Topic(n) => &n.title,
            ContentNode::Slideshow(n) => &n.title,
            ContentNode::Document(n) => &n.title,
            ContentNode::Video(n) => &n.title,
        }
    }
}

/// Per-kind node counts for a channel, used in import summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub topics: usize,
    pub slideshows: usize,
    pub documents: usize,
    pub videos: usize,
}

impl ChannelSummary {
    /// Total number of nodes in the channel tree.
    pub fn total(&self) -> usize {
        self.topics + self.slideshows + self.documents + self.videos
    }
}

/// The root container node representing one importable content package.
#[derive(Debug, Clone, Serialize)]
pub struct Channel {
    /// Domain of the content provider.
    pub source_domain: String,
    /// Unique id of the content source.
    pub source_id: String,
    pub title: String,
    pub description: String,
    /// Primary channel language code.
    pub language: String,
    pub thumbnail_url: String,
    pub children: Vec<ContentNode>,
}

impl Channel {
    /// Appends a top-level node to the channel.
    pub fn add_child(&mut self, node: ContentNode) {
        self.children.push(node);
    }

    /// Counts nodes per kind across the whole tree.
    pub fn summary(&self) -> ChannelSummary {
        let mut summary = ChannelSummary::default();
        for node in &self.children {
            count_node(node, &mut summary);
        }
        summary
    }

    /// Checks the channel tree before it is emitted.
    ///
    /// Mirrors the ingesting platform's channel contract: the channel must
    /// have children, every node needs a nonempty source id and title,
    /// source ids are unique across the tree, topics hold only leaf nodes
    /// and are never empty.
    pub fn validate(&self) -> Result<()> {
        if self.children.is_empty() {
            return Err(ColligoError::InvalidChannel("channel has no children".to_string()));
        }

        let mut seen = HashSet::new();
        for node in &self.children {
            validate_node(node, true, &mut seen)?;
        }

        Ok(())
    }
}

fn count_node(node: &ContentNode, summary: &mut ChannelSummary) {
    match node {
        ContentNode::Topic(topic) => {
            summary.topics += 1;
            for child in &topic.children {
                count_node(child, summary);
            }
        }
        ContentNode::Slideshow(_) => summary.slideshows += 1,
        ContentNode::Document(_) => summary.documents += 1,
        ContentNode::Video(_) => summary.videos += 1,
    }
}

fn validate_node(node: &ContentNode, top_level: bool, seen: &mut HashSet<String>) -> Result<()> {
    if node.source_id().is_empty() {
        return Err(ColligoError::InvalidChannel(format!("node \"{}\" has an empty source id", node.title())));
    }
    if node.title().is_empty() {
        return Err(ColligoError::InvalidChannel(format!("node {} has an empty title", node.source_id())));
    }
    if !seen.insert(node.source_id().to_string()) {
        return Err(ColligoError::InvalidChannel(format!("duplicate source id {}", node.source_id())));
    }

    if let ContentNode::Topic(topic) = node {
        if !top_level {
            return Err(ColligoError::InvalidChannel(format!(
                "topic {} is nested below another topic",
                topic.source_id
            )));
        }
        if topic.children.is_empty() {
            return Err(ColligoError::InvalidChannel(format!("topic {} has no children", topic.source_id)));
        }
        for child in &topic.children {
            validate_node(child, false, seen)?;
        }
    }

    if let ContentNode::Slideshow(slideshow) = node
        && slideshow.slides.is_empty()
    {
        return Err(ColligoError::InvalidChannel(format!("slideshow {} has no slides", slideshow.source_id)));
    }

    Ok(())
}
