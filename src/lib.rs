//! icon-compositor: Declarative vector shapes rasterized into app icons
//!
//! This crate draws an ordered list of simple shapes (ellipses, rectangles,
//! rounded rectangles, polygons and polylines) onto a square canvas and
//! exports the result as a pair of PNG files: an opaque full icon and a
//! transparent foreground-only icon, as used by adaptive launcher icons.
//!
//! # Example
//!
//! ```
//! use icon_compositor::{designs, Compositor, Variant};
//!
//! let composition = designs::lightning_bolt(1024).unwrap();
//! let compositor = Compositor::default();
//!
//! let full = composition.render(Variant::Full, &compositor).unwrap();
//! assert_eq!(full.pixel(10, 10), Some(designs::colors::background()));
//!
//! let png = icon_compositor::encode_png(&full).unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! # Exporting
//!
//! [`export`] renders both variants and writes them to the paths described
//! by an [`ExportConfig`]:
//!
//! ```no_run
//! use icon_compositor::{export, Design, ExportConfig};
//!
//! let config = ExportConfig {
//!     design: Design::EvCharging,
//!     out_dir: "assets/icon".into(),
//!     ..ExportConfig::default()
//! };
//! let composition = config.design.composition(config.size).unwrap();
//! let report = export(&composition, &config).unwrap();
//! println!("{}", report.icon.display());
//! ```

mod canvas;
mod color;
mod composition;
mod compositor;
mod config;
mod error;
mod export;
mod geometry;
mod shape;

pub mod designs;

pub use canvas::{Canvas, PixelMode};
pub use color::Color;
pub use composition::{Composition, Layer, LayeredShape, Variant};
pub use compositor::{render, Compositor, RenderOptions};
pub use config::ExportConfig;
pub use designs::Design;
pub use error::{ComposeError, Result};
pub use export::{encode_png, export, write_file, ExportReport};
pub use geometry::{Bounds, Point};
pub use shape::Shape;
