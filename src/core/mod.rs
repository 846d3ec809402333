//! Core data model for the transform engine.
//!
//! The only entity is [`PixelBuffer`]: a packed row-major RGBA raster owned
//! by exactly one pipeline invocation at a time. Nothing in here is shared
//! across requests.

mod pixel_buffer;

pub use pixel_buffer::{PixelBuffer, clamp_round};
