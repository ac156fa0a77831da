//! Scene files: the container plus the ordered, measured items to lay out.
//!
//! A scene is what the placement engine consumes. It is produced by
//! [`scan`](crate::scan) from a directory of images, or written by hand:
//!
//! ```json
//! {
//!   "container": { "width": 1200.0, "height": 800.0 },
//!   "items": [
//!     { "id": "001-dawn", "width": 240.0, "height": 160.0, "src": "001-dawn.jpg" },
//!     { "id": "002-dusk", "width": 240.0, "height": 320.0 }
//!   ]
//! }
//! ```
//!
//! Item order is placement order.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid size for {0}: dimensions must be finite and non-negative")]
    InvalidSize(String),
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),
}

/// One measured item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Image path relative to the rendered page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Display title, used as alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SceneItem {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub container: Size,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        let scene: Scene = serde_json::from_str(&content)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject sizes the engine cannot meaningfully place and duplicate ids.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.container.is_valid() {
            return Err(SceneError::InvalidSize("container".into()));
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if !item.size().is_valid() {
                return Err(SceneError::InvalidSize(item.id.clone()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(SceneError::DuplicateId(item.id.clone()));
            }
        }
        Ok(())
    }

    /// Ordered item sizes, as fed to the engine.
    pub fn item_sizes(&self) -> Vec<Size> {
        self.items.iter().map(SceneItem::size).collect()
    }

    /// Ids of items larger than the container on either axis.
    pub fn oversized_items(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.size().exceeds(self.container))
            .map(|item| item.id.as_str())
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }
}
