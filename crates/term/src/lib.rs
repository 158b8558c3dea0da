//! Terminal pixel renderer.
//!
//! Turns a grid of RGBA pixels into the escape sequences that reproduce it on
//! a terminal speaking the 256-color SGR dialect. The output aims to be short:
//! colors and cursor position are tracked while emitting, so only changes are
//! written, and transparent pixels are skipped with cursor moves.
//!
//! Pieces, leaf to root:
//! - [`sgr`]: color-setting escape codes
//! - [`cursor`]: picks the cheapest encoding for a cursor displacement
//! - [`source`]: pixel surfaces and the samplers that turn them into glyphs
//! - [`renderer`]: the row-major frame walk
//! - [`printer`]: writes frames to a stream, carrying state between them
//!
//! Terminals without 256-color support are not supported.

pub mod cursor;
pub mod error;
pub mod printer;
pub mod renderer;
pub mod sgr;
pub mod source;

pub use ansipix_core as core;
pub use ansipix_types as types;

pub use error::RenderError;
pub use printer::ImagePrinter;
pub use renderer::{FrameRenderer, RenderOptions, RenderOutput};
pub use source::{BlockSampler, Draw, Glyph, PixelGrid, PixelSource, Sampler};
