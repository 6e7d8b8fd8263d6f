//! The icon compositor.
//!
//! [`Compositor::render`] is a pure function from a canvas size, an ordered
//! list of [`Shape`] instructions and an optional background color to a
//! finished [`Canvas`]. Later instructions paint over earlier ones.
//!
//! # Example
//!
//! ```
//! use icon_compositor::{render, Bounds, Color, Point, Shape};
//!
//! let center = Point::new(512, 512);
//! let shapes = [Shape::ellipse(Bounds::around(center, 400), Color::rgb(0x1B, 0x8F, 0x4E))];
//!
//! let canvas = render(1024, &shapes, Some(Color::rgb(0x2D, 0xBE, 0x6C))).unwrap();
//! assert_eq!(canvas.pixel(10, 10), Some(Color::rgb(0x2D, 0xBE, 0x6C)));
//! assert_eq!(canvas.pixel(512, 512), Some(Color::rgb(0x1B, 0x8F, 0x4E)));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Result;
use crate::shape::Shape;

// ============================================================================
// RenderOptions
// ============================================================================

/// Rasterization settings shared by every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Smooth shape edges. Off by default, which gives hard edges where
    /// every pixel is either fully inside or fully outside a shape.
    #[serde(default)]
    pub anti_alias: bool,
}

// ============================================================================
// Compositor
// ============================================================================

/// Renders shape instructions onto freshly allocated canvases.
///
/// A compositor holds only [`RenderOptions`]; each call to
/// [`render`](Self::render) allocates, owns and returns its own canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor {
    options: RenderOptions,
}

impl Compositor {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Renders `instructions`, in order, onto a `canvas_size` square canvas.
    ///
    /// With `background_fill` the result is an opaque canvas initialised to
    /// that color; without it the canvas starts fully transparent. An empty
    /// instruction list yields the blank canvas.
    ///
    /// Every instruction is validated before the canvas is allocated, so an
    /// error never comes with a partially drawn image.
    ///
    /// # Errors
    ///
    /// - [`InvalidGeometry`](crate::ComposeError::InvalidGeometry) or
    ///   [`InvalidColor`](crate::ComposeError::InvalidColor) from the first
    ///   instruction that fails [`Shape::validate`].
    /// - [`InvalidCanvas`](crate::ComposeError::InvalidCanvas) if
    ///   `canvas_size` is zero or too large to allocate.
    pub fn render<'a, I>(
        &self,
        canvas_size: u32,
        instructions: I,
        background_fill: Option<Color>,
    ) -> Result<Canvas>
    where
        I: IntoIterator<Item = &'a Shape>,
    {
        let shapes: Vec<&Shape> = instructions.into_iter().collect();

        for (index, shape) in shapes.iter().enumerate() {
            if let Err(err) = shape.validate() {
                warn!(index, kind = shape.kind(), %err, "rejected shape instruction");
                return Err(err);
            }
        }

        let mut canvas =
            Canvas::new(canvas_size, background_fill)?.with_anti_alias(self.options.anti_alias);
        for shape in &shapes {
            draw(&mut canvas, shape);
        }

        debug!(
            size = canvas_size,
            instructions = shapes.len(),
            mode = ?canvas.mode(),
            "rendered canvas"
        );
        Ok(canvas)
    }
}

/// Renders with default [`RenderOptions`].
///
/// See [`Compositor::render`].
pub fn render<'a, I>(canvas_size: u32, instructions: I, background_fill: Option<Color>) -> Result<Canvas>
where
    I: IntoIterator<Item = &'a Shape>,
{
    Compositor::default().render(canvas_size, instructions, background_fill)
}

/// Issues the single primitive draw call for `shape`.
///
/// Assumes `shape` has already passed [`Shape::validate`].
fn draw(canvas: &mut Canvas, shape: &Shape) {
    match shape {
        Shape::Ellipse {
            bounds,
            fill,
            outline,
            width,
        } => canvas.ellipse(*bounds, *fill, outline.map(|c| (c, *width))),
        Shape::Rectangle {
            bounds,
            fill,
            outline,
            width,
        } => canvas.rectangle(*bounds, *fill, outline.map(|c| (c, *width))),
        Shape::RoundedRectangle {
            bounds,
            radius,
            fill,
            outline,
            width,
        } => canvas.rounded_rectangle(*bounds, *radius, *fill, outline.map(|c| (c, *width))),
        Shape::Polygon {
            points,
            fill,
            outline,
            width,
        } => canvas.polygon(points, *fill, outline.map(|c| (c, *width))),
        Shape::Line {
            points,
            color,
            width,
        } => {
            if let Some(color) = color {
                canvas.polyline(points, *color, *width);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
