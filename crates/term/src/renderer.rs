//! FrameRenderer: turns a pixel surface into 256-color escape sequences.
//!
//! Pixels are visited row by row, left to right. Cursor position and colors
//! are tracked as the output grows, so only codes that change something are
//! emitted. Transparency is produced by *not drawing*: the cursor is moved
//! past transparent pixels instead of painting them with the background.
//!
//! The returned string has no trailing line break and no trailing reset; the
//! caller appends those if it wants a clean terminal afterwards.

use std::fmt::Write;

use tracing::{debug, trace};

use crate::core::{alpha_blend, quantize};
use crate::cursor;
use crate::error::{RenderError, Result};
use crate::sgr;
use crate::source::{BlockSampler, Draw, PixelSource, Sampler};
use crate::types::{AnsiColor, ColorState, CursorPos, Known, Rgba, TermState};

/// Per-frame rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Opaque frame background. `None` uses the terminal's default background,
    /// in which case partially transparent pixels are drawn as if opaque.
    pub background: Option<Rgba>,
    /// Draw over lines that already exist instead of establishing new ones.
    pub overdraw: bool,
    /// Column offset applied to every pixel.
    pub x_offset: u16,
}

/// Escape sequence for one frame plus the terminal state it leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub ansi: String,
    pub colors: ColorState,
    pub cursor: CursorPos,
}

impl RenderOutput {
    /// State to hand to the next render on the same stream.
    pub fn state(&self) -> TermState {
        TermState::known(self.colors, self.cursor)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRenderer {
    opts: RenderOptions,
}

impl FrameRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    pub fn with_background(mut self, background: Option<Rgba>) -> Self {
        self.opts.background = background;
        self
    }

    pub fn with_overdraw(mut self, overdraw: bool) -> Self {
        self.opts.overdraw = overdraw;
        self
    }

    pub fn with_x_offset(mut self, x_offset: u16) -> Self {
        self.opts.x_offset = x_offset;
        self
    }

    /// Render the top-left `width` x `height` pixels of `source` as colored spaces.
    pub fn render<S: PixelSource + ?Sized>(
        &self,
        source: &S,
        width: u16,
        height: u16,
        state: TermState,
    ) -> Result<RenderOutput> {
        self.render_with(&BlockSampler, source, width, height, state)
    }

    /// Render using a custom sampler.
    pub fn render_with<S: ?Sized, F: Sampler<S> + ?Sized>(
        &self,
        sampler: &F,
        source: &S,
        width: u16,
        height: u16,
        state: TermState,
    ) -> Result<RenderOutput> {
        let mut ansi = String::new();
        let (colors, cursor) = self.render_into(sampler, source, width, height, state, &mut ansi)?;
        Ok(RenderOutput {
            ansi,
            colors,
            cursor,
        })
    }

    /// Append the frame to `out` and return the final colors and cursor.
    ///
    /// On error `out` is truncated back to its length on entry.
    pub fn render_into<S: ?Sized, F: Sampler<S> + ?Sized>(
        &self,
        sampler: &F,
        source: &S,
        width: u16,
        height: u16,
        state: TermState,
        out: &mut String,
    ) -> Result<(ColorState, CursorPos)> {
        let start_len = out.len();
        let result = self.encode(sampler, source, width, height, state, out);
        match result {
            Ok(end) => {
                debug!(
                    width,
                    height,
                    overdraw = self.opts.overdraw,
                    bytes = out.len() - start_len,
                    "rendered frame"
                );
                Ok(end)
            }
            Err(e) => {
                out.truncate(start_len);
                Err(e)
            }
        }
    }

    fn encode<S: ?Sized, F: Sampler<S> + ?Sized>(
        &self,
        sampler: &F,
        source: &S,
        width: u16,
        height: u16,
        state: TermState,
        out: &mut String,
    ) -> Result<(ColorState, CursorPos)> {
        let opts = &self.opts;
        let bg_color = opts.background.map(|c| quantize(c.rgb()));

        let mut colors = match state.colors {
            Known::Known(c) => c,
            Known::Unknown => {
                trace!("color state unknown, emitting full reset");
                sgr::write_reset(out)?;
                ColorState::default()
            }
        };
        let mut pos = state.cursor.unwrap_or(CursorPos::default());

        for y in 0..height {
            let row = y as i32;
            for x in 0..width {
                let glyph = sampler.sample(source, x, y);
                let Some((ch, color)) = self.resolve(glyph.draw, glyph.color, bg_color, x, y)?
                else {
                    continue;
                };

                let target = CursorPos::new(opts.x_offset.saturating_add(x), row);
                if pos != target {
                    cursor::write_move(out, pos, target)?;
                    pos = target;
                }

                // A space only shows its background; any other character
                // needs a deterministic background too.
                let next = if ch == ' ' {
                    ColorState::new(colors.fg, color)
                } else {
                    ColorState::new(color, bg_color)
                };
                sgr::write_set_colors(out, colors, next)?;
                colors = next;

                out.push(ch);
                pos.x = pos.x.saturating_add(1);
            }

            if y + 1 == height || opts.overdraw {
                continue;
            }

            // The line break fills a newly established line with the current
            // background.
            if colors.bg != bg_color {
                let next = ColorState::new(colors.fg, bg_color);
                sgr::write_set_colors(out, colors, next)?;
                colors = next;
            }

            // Rows with nothing drawn leave y behind; x does not matter here
            // since the line break resets it.
            if pos.y != row {
                cursor::write_move(out, CursorPos::new(0, pos.y), CursorPos::new(0, row))?;
                pos.y = row;
            }

            out.push('\n');
            pos = CursorPos::new(0, row.saturating_add(1));
        }

        Ok((colors, pos))
    }

    /// Decide what a sampled glyph turns into: `None` to skip the cell,
    /// otherwise the character and its palette color.
    fn resolve(
        &self,
        draw: Draw,
        rgba: Rgba,
        bg_color: Option<AnsiColor>,
        x: u16,
        y: u16,
    ) -> Result<Option<(char, Option<AnsiColor>)>> {
        let ch = match draw {
            Draw::Erase => return Ok(Some((' ', bg_color))),
            _ if rgba.is_transparent() => return Ok(None),
            Draw::Char(ch) => ch,
            Draw::Text(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => ch,
                    _ => {
                        return Err(RenderError::DrawLength {
                            x,
                            y,
                            len: text.chars().count(),
                        })
                    }
                }
            }
        };

        let rgba = match self.opts.background {
            Some(bg) if !rgba.is_opaque() => alpha_blend(rgba, bg),
            _ => rgba,
        };

        let color = quantize(rgba.rgb());
        if !self.opts.overdraw && ch == ' ' && Some(color) == bg_color {
            return Ok(None);
        }
        Ok(Some((ch, Some(color))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Glyph, PixelGrid};

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    fn idx(c: Option<AnsiColor>) -> Option<u8> {
        c.map(AnsiColor::index)
    }

    #[test]
    fn test_single_red_pixel_from_unknown_state() {
        let g = PixelGrid::filled(1, 1, RED);
        let out = FrameRenderer::default()
            .render(&g, 1, 1, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi, "\x1b[0m\x1b[48;5;196m ");
        assert_eq!(idx(out.colors.bg), Some(196));
        assert_eq!(out.colors.fg, None);
        assert_eq!(out.cursor, CursorPos::new(1, 0));
    }

    #[test]
    fn test_single_red_glyph_sets_foreground() {
        let g = PixelGrid::filled(1, 1, RED);
        let sampler = |src: &PixelGrid, x: u16, y: u16| Glyph::char('X', src.pixel(x, y));
        let out = FrameRenderer::default()
            .render_with(&sampler, &g, 1, 1, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi, "\x1b[0m\x1b[38;5;196mX");
        assert_eq!(idx(out.colors.fg), Some(196));
        assert_eq!(out.colors.bg, None);
        assert_eq!(out.cursor, CursorPos::new(1, 0));
    }

    #[test]
    fn test_transparent_then_blue_moves_right_once() {
        let mut g = PixelGrid::new(2, 1);
        g.set(1, 0, BLUE);
        let out = FrameRenderer::default()
            .render(&g, 2, 1, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi, "\x1b[0m\x1b[1C\x1b[48;5;21m ");
        assert_eq!(out.ansi.matches("\x1b[1C").count(), 1);
        assert_eq!(out.ansi.matches(' ').count(), 1);
    }

    #[test]
    fn test_known_state_skips_reset_and_redundant_color() {
        let g = PixelGrid::filled(2, 1, RED);
        let r = FrameRenderer::default();
        let first = r.render(&g, 2, 1, TermState::unknown()).unwrap();
        let state = TermState::known(first.colors, CursorPos::new(0, 0));
        let second = r.render(&g, 2, 1, state).unwrap();
        assert_eq!(second.ansi, "  ");
    }

    #[test]
    fn test_uniform_image_line_breaks_and_single_color_code() {
        let g = PixelGrid::filled(4, 3, BLUE);
        let out = FrameRenderer::default()
            .render(&g, 4, 3, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi.matches('\n').count(), 2);
        // Color is re-established once per line because the line break needs
        // the default background.
        assert_eq!(
            out.ansi,
            "\x1b[0m\x1b[48;5;21m    \x1b[49m\n\x1b[48;5;21m    \x1b[49m\n\x1b[48;5;21m    "
        );
        assert_eq!(out.cursor, CursorPos::new(4, 2));
    }

    #[test]
    fn test_uniform_image_on_matching_background_draws_nothing() {
        let g = PixelGrid::filled(3, 2, BLUE);
        let out = FrameRenderer::default()
            .with_background(Some(BLUE))
            .render(&g, 3, 2, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi, "\x1b[0m\x1b[48;5;21m\n");
        assert_eq!(idx(out.colors.bg), Some(21));
        assert_eq!(out.cursor, CursorPos::new(0, 1));
    }

    #[test]
    fn test_all_transparent_image() {
        let g = PixelGrid::new(3, 3);
        let out = FrameRenderer::default()
            .render(&g, 3, 3, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi, "\x1b[0m\n\n");
        assert_eq!(out.cursor, CursorPos::new(0, 2));
    }

    #[test]
    fn test_overdraw_skips_end_of_row_handling() {
        let g = PixelGrid::filled(2, 2, RED);
        let out = FrameRenderer::default()
            .with_overdraw(true)
            .render(&g, 2, 2, TermState::unknown())
            .unwrap();
        // No background realignment; the only line feed comes from the
        // cursor move to the next row's first pixel.
        assert!(!out.ansi.contains("\x1b[49m"));
        assert_eq!(out.ansi, "\x1b[0m\x1b[48;5;196m  \n  ");
        assert_eq!(out.cursor, CursorPos::new(2, 1));
    }

    #[test]
    fn test_overdraw_draws_background_colored_spaces() {
        let g = PixelGrid::filled(1, 1, BLUE);
        let out = FrameRenderer::default()
            .with_background(Some(BLUE))
            .with_overdraw(true)
            .render(&g, 1, 1, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi, "\x1b[0m\x1b[48;5;21m ");
    }

    #[test]
    fn test_x_offset_moves_every_row() {
        let g = PixelGrid::filled(1, 2, RED);
        let out = FrameRenderer::default()
            .with_x_offset(3)
            .render(&g, 1, 2, TermState::unknown())
            .unwrap();
        assert_eq!(
            out.ansi,
            "\x1b[0m\x1b[3C\x1b[48;5;196m \x1b[49m\n\x1b[3C\x1b[48;5;196m "
        );
        assert_eq!(out.cursor, CursorPos::new(4, 1));
    }

    #[test]
    fn test_partial_alpha_blends_with_background() {
        let g = PixelGrid::filled(1, 1, Rgba::new(255, 255, 255, 128));
        let out = FrameRenderer::default()
            .with_background(Some(Rgba::opaque(0, 0, 0)))
            .render(&g, 1, 1, TermState::unknown())
            .unwrap();
        // (128, 128, 128) lands on cube level 3 for every channel.
        assert_eq!(out.ansi, "\x1b[0m\x1b[48;5;145m ");
    }

    #[test]
    fn test_partial_alpha_without_background_is_opaque() {
        let g = PixelGrid::filled(1, 1, Rgba::new(255, 0, 0, 10));
        let out = FrameRenderer::default()
            .render(&g, 1, 1, TermState::unknown())
            .unwrap();
        assert_eq!(out.ansi, "\x1b[0m\x1b[48;5;196m ");
    }

    #[test]
    fn test_erase_paints_background() {
        let g = PixelGrid::new(1, 1);
        let erase = |_: &PixelGrid, _: u16, _: u16| Glyph::erase();
        let out = FrameRenderer::default()
            .with_background(Some(BLUE))
            .with_overdraw(true)
            .render_with(
                &erase,
                &g,
                1,
                1,
                TermState::known(ColorState::new(None, None), CursorPos::default()),
            )
            .unwrap();
        assert_eq!(out.ansi, "\x1b[48;5;21m ");

        let out = FrameRenderer::default()
            .with_overdraw(true)
            .render_with(
                &erase,
                &g,
                1,
                1,
                TermState::known(out.colors, CursorPos::default()),
            )
            .unwrap();
        assert_eq!(out.ansi, "\x1b[49m ");
    }

    #[test]
    fn test_multi_char_text_is_rejected_without_partial_output() {
        let g = PixelGrid::filled(2, 1, RED);
        let sampler = |src: &PixelGrid, x: u16, y: u16| Glyph {
            draw: if x == 0 {
                Draw::Char('a')
            } else {
                Draw::Text("ab".to_string())
            },
            color: src.pixel(x, y),
        };
        let mut out = String::from("prefix");
        let err = FrameRenderer::default()
            .render_into(&sampler, &g, 2, 1, TermState::unknown(), &mut out)
            .unwrap_err();
        assert!(matches!(err, RenderError::DrawLength { x: 1, y: 0, len: 2 }));
        assert_eq!(out, "prefix");
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let g = PixelGrid::filled(2, 1, RED);
        let sampler = |src: &PixelGrid, x: u16, y: u16| Glyph {
            draw: if x == 0 {
                Draw::Char(' ')
            } else {
                Draw::Text(String::new())
            },
            color: src.pixel(x, y),
        };
        let mut out = String::from("prefix");
        let err = FrameRenderer::default()
            .render_into(&sampler, &g, 2, 1, TermState::unknown(), &mut out)
            .unwrap_err();
        assert!(matches!(err, RenderError::DrawLength { x: 1, y: 0, len: 0 }));
        assert_eq!(out, "prefix");
    }

    #[test]
    fn test_cursor_far_below_origin_moves_back_up() {
        let g = PixelGrid::filled(1, 2, RED);
        let out = FrameRenderer::default()
            .render(
                &g,
                1,
                2,
                TermState::known(ColorState::default(), CursorPos::new(0, i32::MAX)),
            )
            .unwrap();
        assert!(out.ansi.starts_with("\x1b[65535F"));
        assert!(out.ansi.ends_with("\x1b[49m\n\x1b[48;5;196m "));
        assert_eq!(out.cursor, CursorPos::new(1, 1));
    }

    #[test]
    fn test_single_char_text_is_accepted() {
        let g = PixelGrid::filled(1, 1, RED);
        let sampler = |src: &PixelGrid, x: u16, y: u16| Glyph {
            draw: Draw::Text("é".to_string()),
            color: src.pixel(x, y),
        };
        let out = FrameRenderer::default()
            .render_with(&sampler, &g, 1, 1, TermState::unknown())
            .unwrap();
        assert!(out.ansi.ends_with('é'));
        assert_eq!(out.cursor.x, 1);
    }

    #[test]
    fn test_drifted_cursor_is_corrected_before_line_break() {
        // Start two rows above the frame; the first row is empty.
        let mut g = PixelGrid::new(1, 2);
        g.set(0, 1, RED);
        let out = FrameRenderer::default()
            .render(
                &g,
                1,
                2,
                TermState::known(ColorState::default(), CursorPos::new(0, -2)),
            )
            .unwrap();
        assert_eq!(out.ansi, "\n\n\n\x1b[48;5;196m ");
        assert_eq!(out.cursor, CursorPos::new(1, 1));
    }
}
