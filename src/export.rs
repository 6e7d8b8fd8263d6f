//! PNG encoding and writing the icon file pair.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::info;

use crate::canvas::Canvas;
use crate::composition::{Composition, Variant};
use crate::compositor::Compositor;
use crate::config::ExportConfig;
use crate::error::{ComposeError, Result};

/// Encodes a canvas as PNG.
///
/// Opaque canvases become 8-bit RGB images, transparent ones 8-bit RGBA.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .to_image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Writes `bytes` to `path`, replacing any existing file.
pub fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, bytes).map_err(|e| ComposeError::io(path, e))
}

/// Files produced by [`export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// The opaque icon.
    pub icon: PathBuf,
    /// The transparent foreground icon.
    pub foreground: PathBuf,
}

/// Renders both variants of `composition` and writes them as PNG files.
///
/// The output directory is created first. The full icon is written before
/// the foreground icon; the first failure aborts and is returned, so a
/// failed foreground write can leave the full icon on disk.
pub fn export(composition: &Composition, config: &ExportConfig) -> Result<ExportReport> {
    config.validate()?;
    composition.validate()?;

    fs::create_dir_all(&config.out_dir).map_err(|e| ComposeError::io(&config.out_dir, e))?;

    let compositor = Compositor::new(config.render_options());
    for variant in Variant::ALL {
        let path = config.path_for(variant);
        let canvas = composition.render(variant, &compositor)?;
        let png = encode_png(&canvas)?;
        write_file(&path, &png)?;
        info!("Created {}", path.display());
    }

    Ok(ExportReport {
        icon: config.path_for(Variant::Full),
        foreground: config.path_for(Variant::Foreground),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Bounds;
    use crate::shape::Shape;

    fn sample() -> Composition {
        Composition::new("sample", 32, Color::rgb(0x2D, 0xBE, 0x6C))
            .background(Shape::ellipse(
                Bounds::new(2, 2, 29, 29),
                Color::rgb(0x1B, 0x8F, 0x4E),
            ))
            .foreground(Shape::rectangle(
                Bounds::new(12, 12, 19, 19),
                Color::rgb(255, 255, 255),
            ))
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    #[test]
    fn opaque_png_decodes_to_same_rgb_pixels() {
        let canvas = sample()
            .render(Variant::Full, &Compositor::default())
            .unwrap();
        let png = encode_png(&canvas).unwrap();

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        assert_eq!(decoded.to_rgb8(), canvas.to_rgb_image());
    }

    #[test]
    fn transparent_png_keeps_alpha() {
        let canvas = sample()
            .render(Variant::Foreground, &Compositor::default())
            .unwrap();
        let png = encode_png(&canvas).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        let rgba = decoded.to_rgba8();
        assert_eq!(rgba, canvas.to_rgba_image());
        assert_eq!(rgba.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(rgba.get_pixel(15, 15).0, [255, 255, 255, 255]);
    }

    #[test]
    fn translucent_colors_survive_encoding() {
        let composition = sample().foreground(Shape::rectangle(
            Bounds::new(0, 0, 3, 3),
            Color::rgba(10, 20, 30, 40),
        ));
        let compositor = Compositor::default();

        let full = encode_png(&composition.render(Variant::Full, &compositor).unwrap()).unwrap();
        let full = image::load_from_memory(&full).unwrap().to_rgb8();
        assert_eq!(full.get_pixel(1, 1).0, [10, 20, 30]);

        let fg = encode_png(&composition.render(Variant::Foreground, &compositor).unwrap()).unwrap();
        let fg = image::load_from_memory(&fg).unwrap().to_rgba8();
        assert_eq!(fg.get_pixel(1, 1).0, [10, 20, 30, 40]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let canvas = sample()
            .render(Variant::Full, &Compositor::default())
            .unwrap();
        assert_eq!(encode_png(&canvas).unwrap(), encode_png(&canvas).unwrap());
    }

    // ========================================================================
    // Writing
    // ========================================================================

    #[test]
    fn export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            out_dir: dir.path().join("nested"),
            ..ExportConfig::default()
        };

        let report = export(&sample(), &config).unwrap();
        assert_eq!(report.icon, dir.path().join("nested/app_icon.png"));
        assert_eq!(
            report.foreground,
            dir.path().join("nested/app_icon_foreground.png")
        );

        let icon = image::open(&report.icon).unwrap();
        assert_eq!(icon.color(), image::ColorType::Rgb8);
        assert_eq!(icon.width(), 32);

        let fg = image::open(&report.foreground).unwrap();
        assert_eq!(fg.color(), image::ColorType::Rgba8);
    }

    #[test]
    fn invalid_composition_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            out_dir: dir.path().to_path_buf(),
            ..ExportConfig::default()
        };
        let broken = sample().foreground(Shape::rectangle(
            Bounds::new(5, 5, 5, 9),
            Color::rgb(0, 0, 0),
        ));

        assert!(matches!(
            export(&broken, &config),
            Err(ComposeError::InvalidGeometry(_))
        ));
        assert!(!config.path_for(Variant::Full).exists());
    }

    #[test]
    fn write_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("icon.png");

        match write_file(&target, b"png") {
            Err(ComposeError::Io { path, .. }) => assert_eq!(path, target),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
