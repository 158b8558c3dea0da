//! Color math - pure, deterministic, and testable
//!
//! This crate holds the two numeric building blocks the renderer leans on:
//!
//! - [`color`]: reduce an RGB triple to one of the 216 cube colors of the
//!   256-color palette
//! - [`blend`]: "over" alpha compositing of a partially transparent pixel onto
//!   a background
//!
//! Neither does any dithering or error diffusion; every pixel is handled on
//! its own.
//!
//! # Example
//!
//! ```
//! use ansipix_core::{alpha_blend, quantize};
//! use ansipix_types::Rgba;
//!
//! let half_red = Rgba::new(255, 0, 0, 128);
//! let white = Rgba::opaque(255, 255, 255);
//! let blended = alpha_blend(half_red, white);
//! assert_eq!(blended.a, 255);
//!
//! let idx = quantize(blended.rgb());
//! assert!((16..=231).contains(&idx.index()));
//! ```

pub mod blend;
pub mod color;

pub use ansipix_types as types;

pub use blend::alpha_blend;
pub use color::{cube_level, quantize, quantize_rgba};
