//! Image loading and print configuration.
//!
//! - [`load`]: decode an image file and resize it for terminal display
//! - [`config`]: [`PrintConfig`], read from environment variables

pub mod config;
pub mod load;

pub use ansipix_term as term;
pub use ansipix_types as types;

pub use config::PrintConfig;
pub use load::{load_and_resize, resize_dimensions, LoadedImage};
