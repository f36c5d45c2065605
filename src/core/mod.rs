//! Platform-agnostic core module - shared between the browser component and CLI

pub mod config;
pub mod field;
pub mod grid;
pub mod paint;
pub mod pointer;
pub mod ripple;
pub mod surface;

pub use config::{ConfigError, DotFieldConfig};
pub use field::{dot_opacity, dot_size, DotField, FrameStats};
pub use grid::{generate_grid, Dot};
pub use paint::{DrawCommand, Painter, RecordingPainter, Rgb, Rgba};
pub use pointer::{PointerState, MOUSE_MAX_DISTANCE};
pub use ripple::{Ripple, RippleBuffer, RIPPLE_MAX_AGE_MS};
pub use surface::{Mounted, Surface, SurfaceFit};
