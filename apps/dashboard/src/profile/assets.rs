//! Optional static images: profile photo and contact QR code.
//!
//! Each is looked up under a fixed list of candidate names. A missing file
//! degrades to placeholder text; it is never an error.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

const PHOTO_CANDIDATES: &[&str] = &["avatar.jpg", "avatar.jpeg", "avatar.png", "avatar.webp"];
const QR_CANDIDATES: &[&str] = &["qr.png", "qr.jpg", "qr.jpeg"];

pub const PHOTO_PLACEHOLDER: &str = "No photo";
pub const QR_PLACEHOLDER: &str = "Add assets/qr.png";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssetSlot {
    Found {
        url: String,
        #[serde(skip)]
        path: PathBuf,
    },
    Missing {
        placeholder: String,
    },
}

impl AssetSlot {
    fn file_name(&self) -> Option<&str> {
        match self {
            AssetSlot::Found { path, .. } => path.file_name().and_then(|n| n.to_str()),
            AssetSlot::Missing { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileAssets {
    pub photo: AssetSlot,
    pub qr: AssetSlot,
}

impl ProfileAssets {
    /// Resolves both slots under `dir`. A missing directory just means no assets.
    pub async fn resolve(dir: &Path) -> Self {
        let photo = resolve_slot(dir, PHOTO_CANDIDATES, PHOTO_PLACEHOLDER).await;
        let qr = resolve_slot(dir, QR_CANDIDATES, QR_PLACEHOLDER).await;
        Self { photo, qr }
    }

    /// Path of a resolved asset by its public file name. Only resolved files
    /// are reachable, so arbitrary paths under the directory are not served.
    pub fn lookup(&self, file_name: &str) -> Option<&Path> {
        [&self.photo, &self.qr]
            .into_iter()
            .find(|slot| slot.file_name() == Some(file_name))
            .and_then(|slot| match slot {
                AssetSlot::Found { path, .. } => Some(path.as_path()),
                AssetSlot::Missing { .. } => None,
            })
    }
}

async fn resolve_slot(dir: &Path, candidates: &[&str], placeholder: &str) -> AssetSlot {
    for name in candidates {
        let path = dir.join(name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {
                info!("Resolved asset {}", path.display());
                return AssetSlot::Found {
                    url: format!("/assets/{name}"),
                    path,
                };
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Skipping asset candidate {}: {e}", path.display()),
        }
    }
    AssetSlot::Missing {
        placeholder: placeholder.to_string(),
    }
}

pub fn content_type_for(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
