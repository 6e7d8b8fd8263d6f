//! Named compositions with background and foreground layers.
//!
//! A [`Composition`] is one shared, ordered instruction list. Each entry is
//! tagged with the [`Layer`] it belongs to, and a [`Variant`] selects which
//! layers are rendered:
//!
//! - [`Variant::Full`]: opaque canvas filled with the composition's
//!   background color, every shape drawn.
//! - [`Variant::Foreground`]: transparent canvas, only foreground shapes.
//!
//! # Example
//!
//! ```
//! use icon_compositor::{Bounds, Color, Composition, Compositor, Point, Shape, Variant};
//!
//! let center = Point::new(64, 64);
//! let composition = Composition::new("badge", 128, Color::rgb(0x2D, 0xBE, 0x6C))
//!     .background(Shape::ellipse(Bounds::around(center, 50), Color::rgb(0x1B, 0x8F, 0x4E)))
//!     .foreground(Shape::rectangle(Bounds::around(center, 10), Color::rgb(255, 255, 255)));
//!
//! let compositor = Compositor::default();
//! let full = composition.render(Variant::Full, &compositor).unwrap();
//! let fg = composition.render(Variant::Foreground, &compositor).unwrap();
//!
//! assert_eq!(full.pixel(64, 30), Some(Color::rgb(0x1B, 0x8F, 0x4E)));
//! assert_eq!(fg.pixel(64, 30), Some(Color::transparent()));
//!
//! let json = composition.to_json().unwrap();
//! assert_eq!(Composition::from_json(&json).unwrap(), composition);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::compositor::Compositor;
use crate::error::{ComposeError, Result};
use crate::shape::Shape;

// ============================================================================
// Layer & Variant
// ============================================================================

/// Which layer an instruction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// Drawn only in the full, opaque icon (e.g. a backdrop circle).
    Background,
    /// Drawn in both variants.
    #[default]
    Foreground,
}

/// Which rendering of a composition to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Opaque RGB icon with background fill and all layers.
    Full,
    /// Transparent RGBA icon with foreground shapes only.
    Foreground,
}

impl Variant {
    /// Both variants, in the order they are exported.
    pub const ALL: [Variant; 2] = [Variant::Full, Variant::Foreground];

    /// Returns true if shapes on `layer` are drawn in this variant.
    pub fn includes(self, layer: Layer) -> bool {
        match self {
            Variant::Full => true,
            Variant::Foreground => layer == Layer::Foreground,
        }
    }
}

// ============================================================================
// LayeredShape
// ============================================================================

/// A shape instruction tagged with its layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LayeredShape {
    #[serde(default)]
    pub layer: Layer,
    pub shape: Shape,
}

// ============================================================================
// Composition
// ============================================================================

/// An ordered, layered list of shape instructions plus canvas settings.
///
/// Compositions are built once and never mutated while rendering; the same
/// value renders both variants.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "lightning-bolt",
///   "size": 1024,
///   "background": "#2DBE6C",
///   "shapes": [
///     { "layer": "background",
///       "shape": { "kind": "ellipse", "bounds": [150, 150, 874, 874], "fill": "#1B8F4E" } },
///     { "layer": "foreground",
///       "shape": { "kind": "polygon", "points": [[562, 256], [482, 512], [532, 512]], "fill": "#FFFFFF" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Human-readable identifier, used in logs.
    pub name: String,

    /// Canvas width and height in pixels.
    pub size: u32,

    /// Fill color of the full variant's canvas.
    pub background: Color,

    /// Instructions in painting order.
    #[serde(default)]
    pub shapes: Vec<LayeredShape>,
}

impl Composition {
    /// Creates an empty composition.
    pub fn new(name: impl Into<String>, size: u32, background: Color) -> Self {
        Self {
            name: name.into(),
            size,
            background,
            shapes: Vec::new(),
        }
    }

    /// Appends a shape to the background layer.
    pub fn background(self, shape: Shape) -> Self {
        self.push(Layer::Background, shape)
    }

    /// Appends a shape to the foreground layer.
    pub fn foreground(self, shape: Shape) -> Self {
        self.push(Layer::Foreground, shape)
    }

    fn push(mut self, layer: Layer, shape: Shape) -> Self {
        self.shapes.push(LayeredShape { layer, shape });
        self
    }

    /// Shapes drawn in `variant`, in painting order.
    pub fn shapes(&self, variant: Variant) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(move |s| variant.includes(s.layer))
            .map(|s| &s.shape)
    }

    /// Canvas fill for `variant`: the background color for
    /// [`Variant::Full`], nothing (transparent) for [`Variant::Foreground`].
    pub fn background_for(&self, variant: Variant) -> Option<Color> {
        match variant {
            Variant::Full => Some(self.background),
            Variant::Foreground => None,
        }
    }

    /// Validates every instruction without rendering.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(ComposeError::canvas("canvas size must be positive"));
        }
        self.shapes.iter().try_for_each(|s| s.shape.validate())
    }

    /// Renders one variant.
    pub fn render(&self, variant: Variant, compositor: &Compositor) -> Result<Canvas> {
        debug!(composition = %self.name, ?variant, "rendering variant");
        compositor.render(self.size, self.shapes(variant), self.background_for(variant))
    }

    // ---- Serialization ----

    /// Serializes the composition to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the composition to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a composition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and validates a composition file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ComposeError::io(path, e))?;
        let composition = Self::from_json(&json)?;
        composition.validate()?;
        Ok(composition)
    }
}

// ============================================================================
// Tests
// ============================================================================
