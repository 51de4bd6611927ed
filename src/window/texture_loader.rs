use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

use showcase::Content;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("no image files found in {}", dir_path.display());
    }
    Ok(paths)
}

/// First `<stem>.<ext>` in `dir` with a known image extension.
pub fn find_image(dir: &Path, stem: &str) -> Option<PathBuf> {
    let stem = Path::new(stem).file_stem()?.to_str()?;
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read {}", image_path.display()))?;

    let mut orientation = 1; // Default: no rotation

    // EXIF is only read reliably from JPEG
    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension == "jpg" || extension == "jpeg" {
        match Reader::new().read_from_container(&mut Cursor::new(&file_bytes)) {
            Ok(exif) => {
                if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                    if let Value::Short(values) = &field.value {
                        if let Some(value) = values.first() {
                            orientation = *value;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(path = %image_path.display(), error = %e, "could not read EXIF data");
            }
        }
    }

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow::anyhow!("failed to decode {}: {e}", image_path.display()))?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW. Flipped orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(path = %image_path.display(), orientation, "applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow::anyhow!("failed to create texture for {}: {e}", image_path.display()))?;

    Ok(texture)
}

/// Textures for the dish cards and the gallery. `None` means the image and
/// the fallback both failed, and the view draws a placeholder instead.
pub struct Artwork {
    pub dishes: Vec<Option<Texture2D>>,
    pub gallery: Vec<Option<Texture2D>>,
    pub fallback: Option<Texture2D>,
}

impl Artwork {
    pub fn empty(content: &Content) -> Self {
        Self {
            dishes: content.dishes.iter().map(|_| None).collect(),
            gallery: content.gallery.iter().map(|_| None).collect(),
            fallback: None,
        }
    }

    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, content: &Content, dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            return Self::empty(content);
        };

        let mut load = |path: Option<PathBuf>, what: &str| -> Option<Texture2D> {
            let path = path?;
            match load_texture_with_exif_rotation(rl, thread, &path) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    warn!(what, error = %e, "image failed to load, using fallback");
                    None
                }
            }
        };

        let fallback = load(find_image(dir, "fallback"), "fallback");
        let dishes = content
            .dishes
            .iter()
            .map(|dish| load(find_image(dir, &dish.image), dish.id.as_str()))
            .collect();

        let gallery_paths: Vec<Option<PathBuf>> = match load_sorted_image_paths(&dir.join("gallery")) {
            Ok(paths) => paths.into_iter().map(Some).collect(),
            Err(_) => content.gallery.iter().map(|name| find_image(dir, name)).collect(),
        };
        let gallery = gallery_paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| {
                let what = format!("gallery #{}", i + 1);
                load(path, what.as_str())
            })
            .collect();

        Self { dishes, gallery, fallback }
    }

    /// The dish's own image, or the fallback when it failed to load.
    pub fn dish(&self, index: usize) -> Option<&Texture2D> {
        self.dishes.get(index).and_then(Option::as_ref).or(self.fallback.as_ref())
    }

    pub fn gallery(&self, index: usize) -> Option<&Texture2D> {
        self.gallery.get(index).and_then(Option::as_ref).or(self.fallback.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image(Path::new("a/Biryani.JPG")));
        assert!(is_image(Path::new("naan.png")));
        assert!(!is_image(Path::new("menu.pdf")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn find_image_strips_the_given_extension() {
        let dir = std::env::temp_dir().join(format!("showcase-images-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("garlic-naan.png"), b"").unwrap();

        assert_eq!(find_image(&dir, "garlic-naan.jpg"), Some(dir.join("garlic-naan.png")));
        assert_eq!(find_image(&dir, "veg-biryani"), None);

        fs::remove_dir_all(&dir).unwrap();
    }
}
