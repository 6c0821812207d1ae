//! Window icon loading for Folio
//!
//! Every native window, including secondary viewports, gets the same icon.

use eframe::egui;
use image::GenericImageView;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "bundle-icon")]
const EMBEDDED_ICON: &[u8] = include_bytes!("../../assets/icons/folio_256.png");

/// Icon files, largest first.
const ICON_FILES: [&str; 2] = ["assets/icons/folio_256.png", "assets/icons/folio_64.png"];

/// Decode PNG bytes into `egui::IconData`. `None` if they don't decode.
pub fn load_icon_from_png(png_data: &[u8]) -> Option<egui::IconData> {
    let image = image::load_from_memory(png_data).ok()?;
    let rgba = image.to_rgba8();
    let (width, height) = image.dimensions();

    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

fn load_icon_from_file(path: &Path) -> Option<egui::IconData> {
    let data = std::fs::read(path).ok()?;
    load_icon_from_png(&data)
}

/// Places an icon file is looked for, best first: next to the executable,
/// then relative to the working directory.
fn icon_candidates() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        roots.push(dir);
    }
    roots.push(PathBuf::from("."));

    roots
        .iter()
        .flat_map(|root| ICON_FILES.iter().map(move |file| root.join(file)))
        .collect()
}

/// Application icon for every viewport, or `None` to keep the platform
/// default.
pub fn get_app_icon() -> Option<Arc<egui::IconData>> {
    #[cfg(feature = "bundle-icon")]
    if let Some(icon) = load_icon_from_png(EMBEDDED_ICON) {
        log::info!("Using bundled application icon");
        return Some(Arc::new(icon));
    }

    let found = icon_candidates()
        .into_iter()
        .find_map(|path| load_icon_from_file(&path).map(|icon| (path, icon)));
    match found {
        Some((path, icon)) => {
            log::info!("Loaded application icon from: {}", path.display());
            Some(Arc::new(icon))
        }
        None => {
            log::debug!("No application icon found, using the platform default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_icon_from_png_invalid_data() {
        assert!(load_icon_from_png(b"not a png file").is_none());
    }

    #[test]
    fn test_load_icon_from_file_nonexistent() {
        assert!(load_icon_from_file(Path::new("nonexistent_icon.png")).is_none());
    }

    #[test]
    fn test_candidates_cover_every_icon_file() {
        let candidates = icon_candidates();
        assert!(candidates.len() >= ICON_FILES.len());
        assert!(candidates.iter().all(|p| p.extension().is_some_and(|e| e == "png")));
    }

    #[test]
    fn test_load_icon_from_valid_png() {
        let mut bytes = Vec::new();
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]));
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let icon = load_icon_from_png(&bytes).unwrap();
        assert_eq!((icon.width, icon.height), (4, 2));
        assert_eq!(icon.rgba.len(), 4 * 2 * 4);
    }
}
