//! Lookup of the sprite and per-mood images by filename convention.
//!
//! Images live in the assets directory as `<mood>.<ext>` plus one idle
//! `sprite.gif`. A missing image is an ordinary `None`; callers show the
//! placeholder text instead.

use crate::constants;
use crate::mood::MoodTag;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A resolved image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub path: PathBuf,
    pub animated: bool,
}

impl Asset {
    fn at(path: PathBuf) -> Self {
        let animated = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
        Asset { path, animated }
    }
}

#[derive(Debug, Clone)]
pub struct AssetResolver {
    dir: PathBuf,
}

impl AssetResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        AssetResolver { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Image for `tag`, trying each known extension in order.
    ///
    /// Tags that could escape the assets directory never resolve.
    pub fn mood_image(&self, tag: &MoodTag) -> Option<Asset> {
        let name = tag.as_str();
        if !is_safe_stem(name) {
            debug!("Refusing asset lookup for tag {:?}", name);
            return None;
        }

        constants::IMAGE_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
            .map(Asset::at)
    }

    /// The idle sprite animation.
    pub fn sprite(&self) -> Option<Asset> {
        let path = self.dir.join(constants::SPRITE_FILE_NAME);
        path.is_file().then(|| Asset::at(path))
    }
}

fn is_safe_stem(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// One-line description of an optional asset for text panels.
pub fn describe(asset: Option<&Asset>) -> String {
    match asset {
        Some(asset) if asset.animated => format!("[animation: {}]", asset.path.display()),
        Some(asset) => format!("[image: {}]", asset.path.display()),
        None => constants::IMAGE_PLACEHOLDER.to_string(),
    }
}
