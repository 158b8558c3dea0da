//! Pixel sources and samplers.
//!
//! A [`PixelSource`] is any width x height surface of RGBA pixels. A
//! [`Sampler`] turns a position on a source into the [`Glyph`] to draw there,
//! which lets callers draw arbitrary characters instead of colored spaces.

use crate::types::Rgba;

/// A rectangular surface of RGBA pixels.
pub trait PixelSource {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    fn pixel(&self, x: u16, y: u16) -> Rgba;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u16 {
        (**self).width()
    }

    fn height(&self) -> u16 {
        (**self).height()
    }

    fn pixel(&self, x: u16, y: u16) -> Rgba {
        (**self).pixel(x, y)
    }
}

/// What to draw in one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    /// Paint the frame background here (a space in the background color).
    Erase,
    Char(char),
    /// A string glyph. Must hold exactly one character when rendered.
    Text(String),
}

/// A draw instruction plus the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub draw: Draw,
    pub color: Rgba,
}

impl Glyph {
    /// A space filled with `color`.
    pub const fn block(color: Rgba) -> Self {
        Self {
            draw: Draw::Char(' '),
            color,
        }
    }

    pub const fn erase() -> Self {
        Self {
            draw: Draw::Erase,
            color: Rgba::TRANSPARENT,
        }
    }

    pub const fn char(ch: char, color: Rgba) -> Self {
        Self {
            draw: Draw::Char(ch),
            color,
        }
    }
}

/// Resolves the glyph for a source position.
///
/// Any `Fn(&S, u16, u16) -> Glyph` closure is a sampler.
pub trait Sampler<S: ?Sized> {
    fn sample(&self, source: &S, x: u16, y: u16) -> Glyph;
}

impl<S: ?Sized, F> Sampler<S> for F
where
    F: Fn(&S, u16, u16) -> Glyph,
{
    fn sample(&self, source: &S, x: u16, y: u16) -> Glyph {
        self(source, x, y)
    }
}

/// Default sampler: every pixel is a space in the pixel's color.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockSampler;

impl<S: PixelSource + ?Sized> Sampler<S> for BlockSampler {
    fn sample(&self, source: &S, x: u16, y: u16) -> Glyph {
        Glyph::block(source.pixel(x, y))
    }
}

/// Owned row-major grid of pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u16,
    height: u16,
    pixels: Vec<Rgba>,
}

impl PixelGrid {
    /// A fully transparent grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u16, height: u16, color: Rgba) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    pub fn from_fn(width: u16, height: u16, mut f: impl FnMut(u16, u16) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Rgba> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u16, y: u16, color: Rgba) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }
}

impl PixelSource for PixelGrid {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    /// Out-of-range positions read as transparent.
    fn pixel(&self, x: u16, y: u16) -> Rgba {
        self.get(x, y).unwrap_or(Rgba::TRANSPARENT)
    }
}
