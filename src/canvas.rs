//! Raster canvas with straight-alpha pixels.
//!
//! The canvas exposes the handful of primitives a shape instruction needs
//! (ellipse, rectangle, rounded rectangle, polygon, polyline) and converts
//! the finished surface to `image` buffers for encoding.
//!
//! Shapes are rasterized by tiny-skia into a coverage mask and the ink is
//! then written into an RGBA buffer as-is. Nothing is alpha-blended: a
//! covered pixel takes the shape's color exactly (with alpha forced to 255
//! on opaque canvases, kept as given on transparent ones).
//!
//! # Pixel Addressing
//!
//! Bounding boxes are inclusive on both corners, so a box `[x0, y0, x1, y1]`
//! maps to the float rectangle `x0..x1 + 1`, `y0..y1 + 1`. Polygon and line
//! vertices address pixel centres (`x + 0.5`, `y + 0.5`). With anti-aliasing
//! off, a pixel is painted when its centre lies inside the shape.

use std::fmt;

use image::{DynamicImage, RgbImage, Rgba, RgbaImage};
use resvg::tiny_skia::{
    FillRule, LineCap, LineJoin, Mask, Path, PathBuilder, Rect, Stroke, Transform,
};

use crate::color::Color;
use crate::error::{ComposeError, Result};
use crate::geometry::{Bounds, Point};

/// Cubic Bézier handle length for a quarter circle: 4/3 * tan(π/8).
const KAPPA: f32 = 0.552_284_8;

// ============================================================================
// PixelMode
// ============================================================================

/// Channel layout of the encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// Three channels; the canvas starts filled with an opaque background.
    Opaque,
    /// Four channels; the canvas starts fully transparent.
    Transparent,
}

// ============================================================================
// Canvas
// ============================================================================

/// A square raster surface owned by a single render pass.
#[derive(Clone)]
pub struct Canvas {
    image: RgbaImage,
    /// Scratch coverage buffer, cleared before every primitive.
    coverage: Mask,
    mode: PixelMode,
    anti_alias: bool,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.size())
            .field("mode", &self.mode)
            .field("anti_alias", &self.anti_alias)
            .finish()
    }
}

impl Canvas {
    /// Allocates a `size x size` canvas.
    ///
    /// With a background the canvas is [`PixelMode::Opaque`] and every pixel
    /// starts as that color (its alpha is ignored). Without one it is
    /// [`PixelMode::Transparent`] and starts fully transparent.
    pub fn new(size: u32, background: Option<Color>) -> Result<Self> {
        if size == 0 {
            return Err(ComposeError::canvas("canvas size must be positive"));
        }
        // Row stride in bytes must fit in i32
        if u64::from(size) * 4 > i32::MAX as u64 {
            return Err(ComposeError::canvas(format!("canvas size {size} is too large")));
        }
        let coverage = Mask::new(size, size)
            .ok_or_else(|| ComposeError::canvas(format!("cannot allocate a {size}x{size} canvas")))?;

        let (mode, initial) = match background {
            Some(color) => (PixelMode::Opaque, color.opaque().to_rgba8()),
            None => (PixelMode::Transparent, [0; 4]),
        };

        Ok(Self {
            image: RgbaImage::from_pixel(size, size, Rgba(initial)),
            coverage,
            mode,
            anti_alias: false,
        })
    }

    /// Enables or disables anti-aliased edges for subsequent draws.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Width (and height) in pixels.
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Reads one pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size() || y >= self.size() {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Some(Color::rgba(r, g, b, a))
    }

    /// Raw straight-alpha RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    // ---- Primitives ----

    /// Ellipse inscribed in `bounds`.
    pub fn ellipse(&mut self, bounds: Bounds, fill: Option<Color>, outline: Option<(Color, u32)>) {
        let Some(rect) = pixel_rect(bounds) else {
            return;
        };
        if let Some(color) = fill {
            if let Some(path) = PathBuilder::from_oval(rect) {
                self.fill_path(&path, color, FillRule::Winding);
            }
        }
        if let Some((color, width)) = outline {
            self.outline(rect, color, width, |r, _| PathBuilder::from_oval(r));
        }
    }

    /// Axis-aligned rectangle covering `bounds`.
    pub fn rectangle(&mut self, bounds: Bounds, fill: Option<Color>, outline: Option<(Color, u32)>) {
        let Some(rect) = pixel_rect(bounds) else {
            return;
        };
        if let Some(color) = fill {
            // Only the visible part is rasterized, so huge boxes stay in range
            if let Some(visible) = self.area().and_then(|area| rect.intersect(&area)) {
                self.fill_path(&PathBuilder::from_rect(visible), color, FillRule::Winding);
            }
        }
        if let Some((color, width)) = outline {
            self.outline(rect, color, width, |r, _| Some(PathBuilder::from_rect(r)));
        }
    }

    /// Rectangle with circular corners of `radius`, clamped to half the
    /// shorter side.
    pub fn rounded_rectangle(
        &mut self,
        bounds: Bounds,
        radius: u32,
        fill: Option<Color>,
        outline: Option<(Color, u32)>,
    ) {
        let Some(rect) = pixel_rect(bounds) else {
            return;
        };
        let radius = radius as f32;
        if let Some(color) = fill {
            if let Some(path) = rounded_rect_path(rect, radius) {
                self.fill_path(&path, color, FillRule::Winding);
            }
        }
        if let Some((color, width)) = outline {
            self.outline(rect, color, width, |r, inset| {
                rounded_rect_path(r, radius - inset)
            });
        }
    }

    /// Closed polygon through `points`.
    ///
    /// Filled with the even-odd rule, so a self-crossing outline leaves the
    /// doubly covered region empty.
    pub fn polygon(&mut self, points: &[Point], fill: Option<Color>, outline: Option<(Color, u32)>) {
        let Some(path) = polyline_path(points, true) else {
            return;
        };
        if let Some(color) = fill {
            self.fill_path(&path, color, FillRule::EvenOdd);
        }
        if let Some((color, width)) = outline {
            self.stroke_path(&path, color, width);
        }
    }

    /// Open polyline through `points`.
    pub fn polyline(&mut self, points: &[Point], color: Color, width: u32) {
        if let Some(path) = polyline_path(points, false) {
            self.stroke_path(&path, color, width);
        }
    }

    // ---- Export ----

    /// Returns the straight-alpha RGBA buffer.
    pub fn to_rgba_image(&self) -> RgbaImage {
        self.image.clone()
    }

    /// Converts to an RGB buffer, dropping alpha.
    pub fn to_rgb_image(&self) -> RgbImage {
        DynamicImage::ImageRgba8(self.image.clone()).into_rgb8()
    }

    /// Converts to the buffer type matching [`Self::mode`].
    pub fn to_image(&self) -> DynamicImage {
        match self.mode {
            PixelMode::Opaque => DynamicImage::ImageRgb8(self.to_rgb_image()),
            PixelMode::Transparent => DynamicImage::ImageRgba8(self.to_rgba_image()),
        }
    }

    // ---- Helpers ----

    fn area(&self) -> Option<Rect> {
        let size = self.size() as f32;
        Rect::from_xywh(0.0, 0.0, size, size)
    }

    /// The value written for `color`: alpha is dropped on opaque canvases.
    fn ink(&self, color: Color) -> Rgba<u8> {
        match self.mode {
            PixelMode::Opaque => Rgba(color.opaque().to_rgba8()),
            PixelMode::Transparent => Rgba(color.to_rgba8()),
        }
    }

    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule) {
        self.coverage.clear();
        self.coverage
            .fill_path(path, rule, self.anti_alias, Transform::identity());

        let ink = self.ink(color);
        for (dst, &covered) in self.image.pixels_mut().zip(self.coverage.data()) {
            match covered {
                0 => {}
                u8::MAX => *dst = ink,
                partial => *dst = mix(*dst, ink, partial),
            }
        }
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: u32) {
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        if let Some(outline) = path.stroke(&stroke, 1.0) {
            self.fill_path(&outline, color, FillRule::Winding);
        }
    }

    /// Strokes a border of `width` pixels lying inside `rect`.
    ///
    /// `build` receives the inset rectangle and the inset distance. When the
    /// border is wider than the shape, the whole shape takes the outline color.
    fn outline<F>(&mut self, rect: Rect, color: Color, width: u32, build: F)
    where
        F: Fn(Rect, f32) -> Option<Path>,
    {
        let half = width as f32 / 2.0;
        match inset_rect(rect, half).and_then(|inner| build(inner, half)) {
            Some(path) => self.stroke_path(&path, color, width),
            None => {
                if let Some(path) = build(rect, 0.0) {
                    self.fill_path(&path, color, FillRule::Winding);
                }
            }
        }
    }
}

/// Interpolates from `dst` to `src` by an edge coverage of `amount / 255`.
fn mix(dst: Rgba<u8>, src: Rgba<u8>, amount: u8) -> Rgba<u8> {
    let t = u32::from(amount);
    Rgba(std::array::from_fn(|i| {
        let blended = u32::from(src.0[i]) * t + u32::from(dst.0[i]) * (255 - t);
        ((blended + 127) / 255) as u8
    }))
}

// ============================================================================
// Path Building
// ============================================================================

fn pixel_rect(bounds: Bounds) -> Option<Rect> {
    // Float math: an inclusive edge at i32::MAX must not overflow
    Rect::from_ltrb(
        bounds.x0 as f32,
        bounds.y0 as f32,
        bounds.x1 as f32 + 1.0,
        bounds.y1 as f32 + 1.0,
    )
}

fn inset_rect(rect: Rect, by: f32) -> Option<Rect> {
    let inner = Rect::from_ltrb(
        rect.left() + by,
        rect.top() + by,
        rect.right() - by,
        rect.bottom() - by,
    )?;
    (inner.width() > 0.0 && inner.height() > 0.0).then_some(inner)
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius
        .min(rect.width() / 2.0)
        .min(rect.height() / 2.0)
        .max(0.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

fn polyline_path(points: &[Point], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32 + 0.5, first.y as f32 + 0.5);
    for p in rest {
        pb.line_to(p.x as f32 + 0.5, p.y as f32 + 0.5);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

// ============================================================================
// Tests
// ============================================================================
