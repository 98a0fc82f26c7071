//! Terminal renderer.
//!
//! - [`paint`] - rasterizes a scene into half-block cells
//! - [`buffer`] - the cell grid
//! - [`diff`] - writes only changed cells through crossterm

pub mod buffer;
pub mod diff;
pub mod paint;

pub use buffer::{Cell, FrameBuffer, Rgb};
pub use diff::DiffRenderer;
pub use paint::{paint_scene, pixel_size, PixelCanvas};
