//! ImagePrinter: writes rendered frames to a real output stream.
//!
//! The printer owns the terminal state between frames, so repeated draws to
//! the same stream (animation frames, a slideshow) only emit what changed.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::cursor;
use crate::renderer::FrameRenderer;
use crate::sgr;
use crate::source::{BlockSampler, PixelSource, Sampler};
use crate::types::{ColorState, CursorPos, Known, TermState};

pub struct ImagePrinter<W: Write = io::Stdout> {
    out: W,
    renderer: FrameRenderer,
    state: TermState,
    /// Lowest row (relative to the current frame origin) established so far.
    bottom: i32,
    buf: String,
}

impl ImagePrinter<io::Stdout> {
    pub fn stdout(renderer: FrameRenderer) -> Self {
        Self::new(io::stdout(), renderer)
    }
}

impl<W: Write> ImagePrinter<W> {
    pub fn new(out: W, renderer: FrameRenderer) -> Self {
        Self {
            out,
            renderer,
            state: TermState::unknown(),
            bottom: 0,
            buf: String::with_capacity(64 * 1024),
        }
    }

    pub fn state(&self) -> TermState {
        self.state
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Forget the tracked state; the next frame starts with a full reset.
    pub fn invalidate(&mut self) {
        self.state = TermState::unknown();
        self.bottom = 0;
    }

    /// Draw a frame at the current frame origin.
    ///
    /// The first frame after [`invalidate`](Self::invalidate) or
    /// [`finish`](Self::finish) establishes its lines. Later frames overdraw
    /// them, moving back up to the origin using the tracked cursor.
    pub fn draw_frame<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        self.draw_frame_with(&BlockSampler, source)
    }

    pub fn draw_frame_with<S, F>(&mut self, sampler: &F, source: &S) -> Result<()>
    where
        S: PixelSource + ?Sized,
        F: Sampler<S> + ?Sized,
    {
        let (width, height) = (source.width(), source.height());
        let overdraw = self.renderer.options().overdraw || self.covers(height);
        let renderer = self.renderer.with_overdraw(overdraw);

        self.buf.clear();
        let (colors, pos) = renderer
            .render_into(sampler, source, width, height, self.state, &mut self.buf)
            .context("failed to render frame")?;
        self.state = TermState::known(colors, pos);
        self.bottom = self.bottom.max(pos.y);
        self.flush_buf()?;
        debug!(width, height, overdraw, "frame written");
        Ok(())
    }

    /// Draw `source` as a standalone image and finish the line.
    pub fn print_image<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        self.draw_frame(source)?;
        self.finish()
    }

    /// Move below the drawn area, reset all attributes and end the line.
    ///
    /// The next frame starts a new image below this one.
    pub fn finish(&mut self) -> Result<()> {
        self.buf.clear();
        if let Known::Known(pos) = self.state.cursor {
            if pos.y < self.bottom {
                cursor::write_move(&mut self.buf, pos, CursorPos::new(0, self.bottom))?;
            }
        }
        sgr::write_reset(&mut self.buf)?;
        self.buf.push('\n');
        self.flush_buf()?;

        self.state = TermState {
            colors: Known::Known(ColorState::default()),
            cursor: Known::Unknown,
        };
        self.bottom = 0;
        Ok(())
    }

    /// True once a frame of `height` rows fits inside the established lines.
    ///
    /// Overdrawing rows that were never established would leave them unfilled.
    fn covers(&self, height: u16) -> bool {
        self.state.cursor.is_known() && height > 0 && (height as i32 - 1) <= self.bottom
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out
            .write_all(self.buf.as_bytes())
            .context("failed to write frame")?;
        self.out.flush().context("failed to flush output")?;
        Ok(())
    }
}
