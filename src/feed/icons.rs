//! Plugin icon discovery
//!
//! Icons live in the plugin's `images/` directory under the configured plugin
//! root. An `icon.svg` serves every size; otherwise `icon-128.{png,jpg}` is the
//! default and `icon-256.{png,jpg}` the retina (`2x`) variant.

use crate::models::Icons;
use std::path::PathBuf;

/// Looks through a plugin directory tree for icon files
#[derive(Debug, Clone)]
pub struct IconLocator {
    root: PathBuf,
    base_url: String,
}

impl IconLocator {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Find icons for a plugin slug
    pub fn icons_for(&self, slug: &str) -> Icons {
        let dir = self.root.join(slug).join("images");
        let url = format!("{}/{}/images", self.base_url, slug);
        let exists = |file: &str| dir.join(file).is_file();

        if exists("icon.svg") {
            return Icons::uniform(format!("{}/icon.svg", url));
        }

        let mut icons = Icons::default();
        for ext in ["png", "jpg"] {
            let normal = format!("icon-128.{}", ext);
            if exists(&normal) {
                icons = Icons::uniform(format!("{}/{}", url, normal));
            }
            let retina = format!("icon-256.{}", ext);
            if exists(&retina) {
                icons.two_x = Some(format!("{}/{}", url, retina));
            }
        }
        icons
    }
}
