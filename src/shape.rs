//! Declarative shape instructions.
//!
//! A [`Shape`] describes exactly one primitive draw operation: its geometry
//! and its colors. Shapes carry no drawing state of their own and never look
//! at pixels drawn by earlier shapes; the compositor paints them in order.
//!
//! # JSON Format
//!
//! ```json
//! { "kind": "rounded-rectangle", "bounds": [482, 312, 542, 372], "radius": 10,
//!   "fill": "white", "outline": "#1B8F4E", "width": 4 }
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ComposeError, Result};
use crate::geometry::{Bounds, Point};

fn default_width() -> u32 {
    1
}

fn is_default_width(width: &u32) -> bool {
    *width == default_width()
}

/// One primitive draw operation.
///
/// Closed shapes (everything except [`Line`](Self::Line)) may be filled,
/// outlined, or both. The outline is drawn inside the shape's edge with the
/// given stroke `width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Shape {
    /// Ellipse inscribed in `bounds`.
    Ellipse {
        bounds: Bounds,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outline: Option<Color>,
        #[serde(default = "default_width", skip_serializing_if = "is_default_width")]
        width: u32,
    },

    /// Axis-aligned rectangle.
    Rectangle {
        bounds: Bounds,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outline: Option<Color>,
        #[serde(default = "default_width", skip_serializing_if = "is_default_width")]
        width: u32,
    },

    /// Rectangle with circular-arc corners of `radius` pixels.
    RoundedRectangle {
        bounds: Bounds,
        radius: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outline: Option<Color>,
        #[serde(default = "default_width", skip_serializing_if = "is_default_width")]
        width: u32,
    },

    /// Closed polygon through `points`, in order. The last point connects
    /// back to the first automatically.
    Polygon {
        points: Vec<Point>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outline: Option<Color>,
        #[serde(default = "default_width", skip_serializing_if = "is_default_width")]
        width: u32,
    },

    /// Open polyline stroked through `points`.
    Line {
        points: Vec<Point>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default = "default_width", skip_serializing_if = "is_default_width")]
        width: u32,
    },
}

impl Shape {
    /// A filled ellipse inscribed in `bounds`.
    pub fn ellipse(bounds: Bounds, fill: Color) -> Self {
        Self::Ellipse {
            bounds,
            fill: Some(fill),
            outline: None,
            width: default_width(),
        }
    }

    /// A filled rectangle.
    pub fn rectangle(bounds: Bounds, fill: Color) -> Self {
        Self::Rectangle {
            bounds,
            fill: Some(fill),
            outline: None,
            width: default_width(),
        }
    }

    /// A filled rounded rectangle.
    pub fn rounded_rectangle(bounds: Bounds, radius: u32, fill: Color) -> Self {
        Self::RoundedRectangle {
            bounds,
            radius,
            fill: Some(fill),
            outline: None,
            width: default_width(),
        }
    }

    /// A filled polygon.
    pub fn polygon(points: impl Into<Vec<Point>>, fill: Color) -> Self {
        Self::Polygon {
            points: points.into(),
            fill: Some(fill),
            outline: None,
            width: default_width(),
        }
    }

    /// A stroked polyline.
    pub fn line(points: impl Into<Vec<Point>>, color: Color, width: u32) -> Self {
        Self::Line {
            points: points.into(),
            color: Some(color),
            width,
        }
    }

    /// Adds an outline to a closed shape. Has no effect on lines.
    pub fn with_outline(mut self, color: Color, stroke_width: u32) -> Self {
        match &mut self {
            Self::Ellipse { outline, width, .. }
            | Self::Rectangle { outline, width, .. }
            | Self::RoundedRectangle { outline, width, .. }
            | Self::Polygon { outline, width, .. } => {
                *outline = Some(color);
                *width = stroke_width;
            }
            Self::Line { .. } => {}
        }
        self
    }

    /// Short lowercase name used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ellipse { .. } => "ellipse",
            Self::Rectangle { .. } => "rectangle",
            Self::RoundedRectangle { .. } => "rounded-rectangle",
            Self::Polygon { .. } => "polygon",
            Self::Line { .. } => "line",
        }
    }

    /// Checks geometry and colors without drawing anything.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::InvalidGeometry`] for an empty or inverted bounding
    ///   box, a polygon with fewer than 3 points, a line with fewer than 2
    ///   points, or a zero stroke width on an outline or line.
    /// - [`ComposeError::InvalidColor`] for a closed shape with neither fill
    ///   nor outline, or a line without a color.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Ellipse {
                bounds,
                fill,
                outline,
                width,
            }
            | Self::Rectangle {
                bounds,
                fill,
                outline,
                width,
            }
            | Self::RoundedRectangle {
                bounds,
                fill,
                outline,
                width,
                ..
            } => {
                bounds.validate()?;
                self.validate_paint(fill, outline, *width)
            }
            Self::Polygon {
                points,
                fill,
                outline,
                width,
            } => {
                if points.len() < 3 {
                    return Err(ComposeError::geometry(format!(
                        "polygon needs at least 3 points, got {}",
                        points.len()
                    )));
                }
                self.validate_paint(fill, outline, *width)
            }
            Self::Line {
                points,
                color,
                width,
            } => {
                if points.len() < 2 {
                    return Err(ComposeError::geometry(format!(
                        "line needs at least 2 points, got {}",
                        points.len()
                    )));
                }
                if color.is_none() {
                    return Err(ComposeError::color("line has no stroke color"));
                }
                if *width == 0 {
                    return Err(ComposeError::geometry("line has zero stroke width"));
                }
                Ok(())
            }
        }
    }

    fn validate_paint(&self, fill: &Option<Color>, outline: &Option<Color>, width: u32) -> Result<()> {
        if fill.is_none() && outline.is_none() {
            return Err(ComposeError::color(format!(
                "{} has neither a fill nor an outline color",
                self.kind()
            )));
        }
        if outline.is_some() && width == 0 {
            return Err(ComposeError::geometry(format!(
                "{} outline has zero stroke width",
                self.kind()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
