//! Channel package writing.
//!
//! A package is a directory with a `manifest.json` holding the full node
//! tree and a `files/` subdirectory holding the assembled PDF documents.
//! Remote video and image URLs stay URLs in the manifest; resolving them
//! is the ingesting platform's job.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::nodes::{Channel, ContentNode};
use crate::{ColligoError, Result};

/// Name of the manifest file inside a package.
pub const MANIFEST_NAME: &str = "manifest.json";

/// Subdirectory holding document files.
pub const FILES_DIR: &str = "files";

/// Outcome of writing one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    /// Path of the written manifest.
    pub manifest_path: PathBuf,
    /// Document files copied into the package.
    pub files_copied: usize,
    /// Document files already present with a matching digest.
    pub files_skipped: usize,
}

/// Writes `channel` as a package under `dir`.
///
/// Document nodes are copied into `files/` and rewritten to point at the
/// packaged copy; each carries the sha256 of its content so a re-run can
/// skip files that have not changed.
pub fn write_package(mut channel: Channel, dir: &Path) -> Result<PackageReport> {
    let files_dir = dir.join(FILES_DIR);
    fs::create_dir_all(&files_dir)?;

    let mut report =
        PackageReport { manifest_path: dir.join(MANIFEST_NAME), files_copied: 0, files_skipped: 0 };

    for node in &mut channel.children {
        package_node(node, &files_dir, &mut report)?;
    }

    let manifest = serde_json::to_string_pretty(&channel)?;
    fs::write(&report.manifest_path, manifest)?;

    tracing::info!(
        manifest = %report.manifest_path.display(),
        copied = report.files_copied,
        skipped = report.files_skipped,
        "Wrote package"
    );

    Ok(report)
}

fn package_node(node: &mut ContentNode, files_dir: &Path, report: &mut PackageReport) -> Result<()> {
    match node {
        ContentNode::Topic(topic) => {
            for child in &mut topic.children {
                package_node(child, files_dir, report)?;
            }
        }
        ContentNode::Document(doc) => {
            let bytes = fs::read(&doc.path)?;
            let digest = sha256_hex(&bytes);

            let file_name = doc
                .path
                .file_name()
                .ok_or_else(|| ColligoError::InvalidChannel(format!("document {} has no file name", doc.source_id)))?
                .to_owned();
            let target = files_dir.join(&file_name);

            if target.exists() && fs::read(&target).map(|existing| sha256_hex(&existing) == digest).unwrap_or(false) {
                report.files_skipped += 1;
            } else {
                fs::write(&target, &bytes)?;
                report.files_copied += 1;
            }

            doc.digest = Some(digest);
            doc.path = PathBuf::from(FILES_DIR).join(file_name);
        }
        ContentNode::Slideshow(_) | ContentNode::Video(_) => {}
    }

    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
