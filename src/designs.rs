//! The built-in icon designs.
//!
//! Each design derives every coordinate from a small table of named anchors
//! computed once from the canvas size. The offsets are hand-tuned for a
//! 1024 pixel canvas and are fixed data: only the canvas center moves with
//! `size`, everything else keeps its pixel offsets.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::composition::Composition;
use crate::error::{ComposeError, Result};
use crate::geometry::{Bounds, Point};
use crate::shape::Shape;

/// Canvas size both designs were tuned for.
pub const DEFAULT_SIZE: u32 = 1024;

/// Largest canvas size whose anchor arithmetic fits in `i32`.
pub const MAX_SIZE: u32 = i32::MAX as u32 / 4;

/// Converts a canvas size to the signed extent anchors are computed from.
fn extent(size: u32) -> Result<i32> {
    if size == 0 || size > MAX_SIZE {
        return Err(ComposeError::canvas(format!(
            "design size must be between 1 and {MAX_SIZE}, got {size}"
        )));
    }
    Ok(size as i32)
}

// ============================================================================
// Palette
// ============================================================================

/// Colors shared by the designs.
pub mod colors {
    use crate::color::Color;

    /// Bright green canvas background.
    pub fn background() -> Color {
        Color::rgb(0x2D, 0xBE, 0x6C)
    }

    /// Dark green backdrop circle, plug outline and pins.
    pub fn deep_green() -> Color {
        Color::rgb(0x1B, 0x8F, 0x4E)
    }

    pub fn white() -> Color {
        Color::rgb(0xFF, 0xFF, 0xFF)
    }

    pub fn window() -> Color {
        Color::rgb(0xE8, 0xF5, 0xE9)
    }

    pub fn tire() -> Color {
        Color::rgb(0x42, 0x42, 0x42)
    }

    pub fn leaf() -> Color {
        Color::rgb(0x4C, 0xAF, 0x50)
    }

    pub fn leaf_vein() -> Color {
        Color::rgb(0x38, 0x8E, 0x3C)
    }

    pub fn bolt() -> Color {
        Color::rgb(0xFD, 0xD8, 0x35)
    }
}

// ============================================================================
// Design
// ============================================================================

/// Selects one of the built-in compositions by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Design {
    /// Car with leaf, charging bolt and plug on a dark circle.
    #[default]
    EvCharging,
    /// A single white lightning bolt on a dark circle.
    LightningBolt,
}

impl Design {
    pub const ALL: [Design; 2] = [Design::EvCharging, Design::LightningBolt];

    pub fn name(self) -> &'static str {
        match self {
            Design::EvCharging => "ev-charging",
            Design::LightningBolt => "lightning-bolt",
        }
    }

    /// Builds the composition at `size` pixels.
    ///
    /// Fails with [`ComposeError::InvalidCanvas`] unless `1 <= size <= MAX_SIZE`.
    pub fn composition(self, size: u32) -> Result<Composition> {
        match self {
            Design::EvCharging => ev_charging(size),
            Design::LightningBolt => lightning_bolt(size),
        }
    }
}

// ============================================================================
// EV Charging
// ============================================================================

/// Named reference points of the EV charging design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvChargingAnchors {
    pub center: i32,
    pub circle_radius: i32,
    pub car_width: i32,
    pub car_height: i32,
    /// Top-left corner of the car body.
    pub car: Point,
    pub window_margin: i32,
    pub wheel_radius: i32,
    pub wheel_y: i32,
    /// Tip of the leaf.
    pub leaf: Point,
    /// Reference point of the small charging bolt.
    pub bolt: Point,
    /// Top center of the plug.
    pub plug: Point,
}

impl EvChargingAnchors {
    pub fn new(size: u32) -> Result<Self> {
        let center = extent(size)? / 2;
        let car_width = 300;
        let car_height = 120;
        let car = Point::new(center - car_width / 2, center - 80);

        Ok(Self {
            center,
            circle_radius: 400,
            car_width,
            car_height,
            car,
            window_margin: 40,
            wheel_radius: 35,
            wheel_y: car.y + car_height - 10,
            leaf: Point::new(center - 200, center + 100),
            bolt: Point::new(center + 180, center + 100),
            plug: Point::new(center, center - 200),
        })
    }

    /// Centers of the rear and front wheels.
    pub fn wheel_centers(&self) -> [Point; 2] {
        [
            Point::new(self.car.x + 40, self.wheel_y),
            Point::new(self.car.x + self.car_width - 40, self.wheel_y),
        ]
    }

    pub fn leaf_points(&self) -> Vec<Point> {
        let l = self.leaf;
        vec![
            l,
            l.offset(-30, 30),
            l.offset(-20, 60),
            l.offset(0, 80),
            l.offset(20, 60),
            l.offset(30, 30),
        ]
    }

    pub fn bolt_points(&self) -> Vec<Point> {
        let b = self.bolt;
        vec![
            b.offset(20, 0),
            b.offset(-10, 35),
            b.offset(10, 35),
            b.offset(-20, 70),
            b.offset(10, 40),
            b.offset(-10, 40),
        ]
    }
}

/// Car, leaf, bolt and plug on a dark green circle.
///
/// Only the backdrop circle is on the background layer; the foreground
/// variant keeps every other shape.
pub fn ev_charging(size: u32) -> Result<Composition> {
    let a = EvChargingAnchors::new(size)?;
    let center = Point::new(a.center, a.center);
    let (car, w, h, margin) = (a.car, a.car_width, a.car_height, a.window_margin);

    let mut composition = Composition::new(Design::EvCharging.name(), size, colors::background())
        .background(Shape::ellipse(
            Bounds::around(center, a.circle_radius),
            colors::deep_green(),
        ))
        // Car body and windows
        .foreground(Shape::rounded_rectangle(
            Bounds::new(car.x, car.y, car.x + w, car.y + h),
            30,
            colors::white(),
        ))
        .foreground(Shape::rounded_rectangle(
            Bounds::new(car.x + margin, car.y + 20, car.x + w / 2 - 10, car.y + 70),
            15,
            colors::window(),
        ))
        .foreground(Shape::rounded_rectangle(
            Bounds::new(car.x + w / 2 + 10, car.y + 20, car.x + w - margin, car.y + 70),
            15,
            colors::window(),
        ));

    for wheel in a.wheel_centers() {
        composition = composition.foreground(Shape::ellipse(
            Bounds::around(wheel, a.wheel_radius),
            colors::tire(),
        ));
    }

    let leaf = a.leaf;
    let plug = a.plug;
    Ok(composition
        .foreground(Shape::polygon(a.leaf_points(), colors::leaf()))
        .foreground(Shape::line([leaf, leaf.offset(0, 80)], colors::leaf_vein(), 4))
        .foreground(Shape::polygon(a.bolt_points(), colors::bolt()))
        // Plug body and pins
        .foreground(
            Shape::rounded_rectangle(
                Bounds::new(plug.x - 30, plug.y, plug.x + 30, plug.y + 60),
                10,
                colors::white(),
            )
            .with_outline(colors::deep_green(), 4),
        )
        .foreground(Shape::rectangle(
            Bounds::new(plug.x - 15, plug.y + 10, plug.x - 5, plug.y + 35),
            colors::deep_green(),
        ))
        .foreground(Shape::rectangle(
            Bounds::new(plug.x + 5, plug.y + 10, plug.x + 15, plug.y + 35),
            colors::deep_green(),
        )))
}

// ============================================================================
// Lightning Bolt
// ============================================================================

/// Margin between the canvas edge and the backdrop circle.
const BOLT_CIRCLE_MARGIN: i32 = 150;

/// Vertices of the plain lightning bolt, from the top tip clockwise.
pub fn lightning_bolt_points(size: u32) -> Result<Vec<Point>> {
    let s = extent(size)?;
    Ok(vec![
        Point::new(s / 2 + 50, s / 4),
        Point::new(s / 2 - 30, s / 2),
        Point::new(s / 2 + 20, s / 2),
        Point::new(s / 2 - 50, s * 3 / 4),
        Point::new(s / 2 + 30, s / 2 + 50),
        Point::new(s / 2 - 20, s / 2 + 50),
    ])
}

/// A white lightning bolt on a dark green circle.
pub fn lightning_bolt(size: u32) -> Result<Composition> {
    let s = extent(size)?;
    let m = BOLT_CIRCLE_MARGIN;

    Ok(Composition::new(Design::LightningBolt.name(), size, colors::background())
        .background(Shape::ellipse(
            Bounds::new(m, m, s - m, s - m),
            colors::deep_green(),
        ))
        .foreground(Shape::polygon(lightning_bolt_points(size)?, colors::white())))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Compositor;
    use crate::composition::Variant;

    fn at(canvas: &crate::Canvas, x: u32, y: u32) -> Color {
        canvas.pixel(x, y).expect("pixel inside canvas")
    }

    #[test]
    fn ev_charging_anchor_table() {
        let a = EvChargingAnchors::new(DEFAULT_SIZE).unwrap();
        assert_eq!(a.center, 512);
        assert_eq!(a.car, Point::new(362, 432));
        assert_eq!(a.wheel_y, 542);
        assert_eq!(
            a.wheel_centers(),
            [Point::new(402, 542), Point::new(622, 542)]
        );
        assert_eq!(a.leaf, Point::new(312, 612));
        assert_eq!(a.bolt, Point::new(692, 612));
        assert_eq!(a.plug, Point::new(512, 312));
        assert_eq!(a.bolt_points()[3], Point::new(672, 682));
    }

    #[test]
    fn ev_charging_layers() {
        // Circle, body, 2 windows, 2 wheels, leaf, vein, bolt, plug, 2 pins
        let composition = ev_charging(DEFAULT_SIZE).unwrap();
        assert_eq!(composition.shapes.len(), 12);
        assert_eq!(composition.shapes(Variant::Foreground).count(), 11);
        assert!(composition.validate().is_ok());
    }

    #[test]
    fn ev_charging_full_icon_pixels() {
        let canvas = ev_charging(DEFAULT_SIZE)
            .unwrap()
            .render(Variant::Full, &Compositor::default())
            .unwrap();

        assert_eq!(at(&canvas, 10, 10), colors::background());
        assert_eq!(at(&canvas, 512, 200), colors::deep_green());
        // Car body below the windows
        assert_eq!(at(&canvas, 512, 512), colors::white());
        assert_eq!(at(&canvas, 452, 477), colors::window());
        assert_eq!(at(&canvas, 402, 542), colors::tire());
        assert_eq!(at(&canvas, 300, 650), colors::leaf());
        assert_eq!(at(&canvas, 312, 650), colors::leaf_vein());
        assert_eq!(at(&canvas, 692, 649), colors::bolt());
        // Plug body, outline and left pin
        assert_eq!(at(&canvas, 512, 360), colors::white());
        assert_eq!(at(&canvas, 483, 340), colors::deep_green());
        assert_eq!(at(&canvas, 502, 334), colors::deep_green());
    }

    #[test]
    fn ev_charging_foreground_is_transparent_outside_shapes() {
        let canvas = ev_charging(DEFAULT_SIZE)
            .unwrap()
            .render(Variant::Foreground, &Compositor::default())
            .unwrap();

        assert_eq!(at(&canvas, 10, 10), Color::transparent());
        assert_eq!(at(&canvas, 512, 200), Color::transparent());
        assert_eq!(at(&canvas, 512, 512), colors::white());
        assert_eq!(at(&canvas, 692, 649), colors::bolt());
    }

    #[test]
    fn lightning_bolt_points_match_canvas() {
        let points = lightning_bolt_points(DEFAULT_SIZE).unwrap();
        assert_eq!(points[0], Point::new(562, 256));
        assert_eq!(points[3], Point::new(462, 768));
        assert_eq!(points[5], Point::new(492, 562));
    }

    #[test]
    fn lightning_bolt_pixels() {
        let composition = lightning_bolt(DEFAULT_SIZE).unwrap();
        let compositor = Compositor::default();

        let full = composition.render(Variant::Full, &compositor).unwrap();
        assert_eq!(at(&full, 10, 10), colors::background());
        assert_eq!(at(&full, 200, 512), colors::deep_green());
        assert_eq!(at(&full, 510, 540), colors::white());

        let fg = composition.render(Variant::Foreground, &compositor).unwrap();
        assert_eq!(at(&fg, 200, 512), Color::transparent());
        assert_eq!(at(&fg, 510, 540), colors::white());
    }

    #[test]
    fn designs_by_name() {
        for design in Design::ALL {
            let composition = design.composition(DEFAULT_SIZE).unwrap();
            assert_eq!(composition.name, design.name());
            assert_eq!(composition.size, DEFAULT_SIZE);
        }
        assert_eq!(Design::default(), Design::EvCharging);
    }

    #[test]
    fn oversized_design_is_rejected() {
        for design in Design::ALL {
            for size in [0, MAX_SIZE + 1, 1_000_000_000, u32::MAX] {
                assert!(
                    matches!(design.composition(size), Err(ComposeError::InvalidCanvas(_))),
                    "{design:?} at {size}"
                );
            }
        }
        assert!(lightning_bolt_points(MAX_SIZE).is_ok());
        assert!(EvChargingAnchors::new(MAX_SIZE).is_ok());
    }

    #[test]
    fn leaf_vein_is_stroked_four_pixels_wide() {
        let canvas = ev_charging(DEFAULT_SIZE)
            .unwrap()
            .render(Variant::Foreground, &Compositor::default())
            .unwrap();

        // Vertical vein from (312, 612) to (312, 692), centred on x = 312.5
        for x in 311..=313 {
            assert_eq!(at(&canvas, x, 650), colors::leaf_vein(), "x = {x}");
        }
        assert_eq!(at(&canvas, 309, 650), colors::leaf());
        assert_eq!(at(&canvas, 315, 650), colors::leaf());
        // Butt caps: nothing below the last vertex
        assert_eq!(at(&canvas, 312, 694), Color::transparent());
    }
}
