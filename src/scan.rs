//! Directory scanning: images on disk → [`Scene`].
//!
//! This is the measurement side of the collage. It lists the image files
//! directly inside a directory, orders them by the `NNN-name` convention
//! (see [`naming`](crate::naming)), reads their pixel dimensions and scales
//! each one to the configured display width.
//!
//! ```text
//! photos/
//! ├── 010-harbour.jpg      # placed first
//! ├── 020-lighthouse.png   # placed second
//! ├── gulls.webp           # unnumbered: placed after numbered files
//! └── notes.txt            # not an image: ignored
//! ```
//!
//! Dimension probing only reads image headers and runs in parallel on the
//! rayon pool; results are collected back in placement order.

use crate::config::ScanConfig;
use crate::geometry::{Size, scale_to_width};
use crate::naming::{ItemName, parse_item_name};
use crate::scene::{Scene, SceneError, SceneItem};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Duplicate image number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("No images found in {0}")]
    NoImages(PathBuf),
    #[error("Scanned scene is invalid: {0}")]
    Scene(#[from] SceneError),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp"];

/// An image file found on disk, before measuring.
#[derive(Debug, Clone)]
struct ImageFile {
    path: PathBuf,
    file_name: String,
    stem: String,
    name: ItemName,
}

/// Scan `dir` into a scene for the given container.
pub fn scan(dir: &Path, config: &ScanConfig, container: Size) -> Result<Scene, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let files = list_images(dir)?;
    if files.is_empty() {
        return Err(ScanError::NoImages(dir.to_path_buf()));
    }
    check_duplicate_numbers(&files, dir)?;

    let items = files
        .par_iter()
        .map(|file| measure(file, config.item_width))
        .collect::<Result<Vec<_>, _>>()?;

    // Same checks as `Scene::load`, so a scanned scene always reloads.
    let scene = Scene { container, items };
    scene.validate()?;
    Ok(scene)
}

/// Image files directly inside `dir`, in placement order.
fn list_images(dir: &Path) -> Result<Vec<ImageFile>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        let path = entry.path().to_path_buf();
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = parse_item_name(&stem);
        files.push(ImageFile {
            path,
            file_name,
            stem,
            name,
        });
    }
    files.sort_by(|a, b| a.name.order(&b.name).then_with(|| a.file_name.cmp(&b.file_name)));
    Ok(files)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn check_duplicate_numbers(files: &[ImageFile], dir: &Path) -> Result<(), ScanError> {
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for file in files {
        if let Some(n) = file.name.number
            && seen.insert(n, &file.file_name).is_some()
        {
            return Err(ScanError::DuplicateNumber(n, dir.to_path_buf()));
        }
    }
    Ok(())
}

fn measure(file: &ImageFile, item_width: f64) -> Result<SceneItem, ScanError> {
    let pixels = image::image_dimensions(&file.path).map_err(|source| ScanError::Image {
        path: file.path.clone(),
        source,
    })?;
    let size = scale_to_width(pixels, item_width);
    let title = (!file.name.title.is_empty()).then(|| file.name.title.clone());

    Ok(SceneItem {
        id: file.stem.clone(),
        width: size.width,
        height: size.height,
        src: Some(file.file_name.clone()),
        title,
    })
}
