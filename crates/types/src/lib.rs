//! Core types module - shared data structures for the pixel renderer
//!
//! This crate defines the fundamental types threaded through a render call.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (color math, escape-code generation, image loading).
//!
//! # Color Model
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Rgba`] | 8-bit RGBA pixel, alpha 0 = fully transparent, 255 = fully opaque |
//! | [`Rgb`] | 8-bit RGB triple (alpha discarded) |
//! | [`AnsiColor`] | index 16..=231 in the 6x6x6 cube of the 256-color palette |
//!
//! An `Option<AnsiColor>` of `None` means "terminal default color".
//!
//! # Render State
//!
//! [`ColorState`] and [`CursorPos`] are both an input and an output of every
//! render: the result of one call can be handed to the next so back-to-back
//! frames written to the same stream skip redundant escape codes. When the
//! state is not known, pass [`Known::Unknown`].
//!
//! # Examples
//!
//! ```
//! use ansipix_types::{AnsiColor, ColorState, CursorPos, Known, Rgba, TermState};
//!
//! let red = Rgba::new(255, 0, 0, 255);
//! assert!(red.is_opaque());
//!
//! // Level 5 red, level 0 green/blue is palette index 196.
//! let cube = AnsiColor::from_cube_levels(5, 0, 0).unwrap();
//! assert_eq!(cube.index(), 196);
//!
//! let state: Known<ColorState> = None.into();
//! assert_eq!(state, Known::Unknown);
//! assert_eq!(CursorPos::default(), CursorPos::new(0, 0));
//! assert_eq!(TermState::default().colors, state);
//! ```

use std::fmt;

/// First palette index of the 6x6x6 color cube.
pub const CUBE_START: u8 = 16;

/// Last palette index of the 6x6x6 color cube.
pub const CUBE_END: u8 = 231;

/// Number of levels per channel in the color cube.
pub const CUBE_LEVELS: u8 = 6;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// 32-bit RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from an RGB triple.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(p: [u8; 4]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Self::opaque(c.r, c.g, c.b)
    }
}

/// A "reduced" color: one of the 216 entries of the 256-color palette's cube.
///
/// Raw RGB never reaches the escape-code layer; everything goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnsiColor(u8);

impl AnsiColor {
    /// Build from per-channel cube levels (each 0..=5).
    pub const fn from_cube_levels(r: u8, g: u8, b: u8) -> Option<Self> {
        if r >= CUBE_LEVELS || g >= CUBE_LEVELS || b >= CUBE_LEVELS {
            return None;
        }
        Some(Self(r * 36 + g * 6 + b + CUBE_START))
    }

    /// Palette index (16..=231).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Build from cube levels, clamping each to the top level (5).
    pub const fn from_cube_levels_clamped(r: u8, g: u8, b: u8) -> Self {
        const fn clamp(level: u8) -> u8 {
            if level < CUBE_LEVELS {
                level
            } else {
                CUBE_LEVELS - 1
            }
        }
        Self(clamp(r) * 36 + clamp(g) * 6 + clamp(b) + CUBE_START)
    }
}

impl fmt::Display for AnsiColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Colors the terminal is currently configured to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorState {
    pub fg: Option<AnsiColor>,
    pub bg: Option<AnsiColor>,
}

impl ColorState {
    pub const fn new(fg: Option<AnsiColor>, bg: Option<AnsiColor>) -> Self {
        Self { fg, bg }
    }
}

/// Tracked cursor position.
///
/// `x` is an absolute column (a line break resets it to 0). `y` is relative to
/// the y the render started from; it says nothing about the screen row since
/// terminal dimensions are never queried. A negative `y` on input starts the
/// drawing further down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorPos {
    pub x: u16,
    pub y: i32,
}

impl CursorPos {
    pub const fn new(x: u16, y: i32) -> Self {
        Self { x, y }
    }
}

/// State that may or may not be known at the start of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Known<T> {
    #[default]
    Unknown,
    Known(T),
}

impl<T> Known<T> {
    pub fn known(self) -> Option<T> {
        match self {
            Known::Unknown => None,
            Known::Known(v) => Some(v),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Known::Known(_))
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Known::Unknown => default,
            Known::Known(v) => v,
        }
    }
}

impl<T> From<Option<T>> for Known<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            None => Known::Unknown,
            Some(v) => Known::Known(v),
        }
    }
}

/// Terminal state carried from one render call into the next.
///
/// `TermState::default()` is fully unknown: the renderer emits a full reset
/// and assumes the cursor sits at `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TermState {
    pub colors: Known<ColorState>,
    pub cursor: Known<CursorPos>,
}

impl TermState {
    pub const fn unknown() -> Self {
        Self {
            colors: Known::Unknown,
            cursor: Known::Unknown,
        }
    }

    pub const fn known(colors: ColorState, cursor: CursorPos) -> Self {
        Self {
            colors: Known::Known(colors),
            cursor: Known::Known(cursor),
        }
    }
}
