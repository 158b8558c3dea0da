//! SGR ("Select Graphic Rendition") color codes for the 256-color dialect.
//!
//! Parameters are kept as separate groups so a background and a foreground
//! change can share one escape sequence.

use std::fmt::{self, Write};

use crossterm::{style::ResetColor, Command};

use crate::types::{AnsiColor, ColorState};

/// One parameter group of an SGR escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrParam {
    /// `38;5;<n>`
    Foreground(AnsiColor),
    /// `48;5;<n>`
    Background(AnsiColor),
    /// `39`
    DefaultForeground,
    /// `49`
    DefaultBackground,
}

impl fmt::Display for SgrParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SgrParam::Foreground(c) => write!(f, "38;5;{}", c.index()),
            SgrParam::Background(c) => write!(f, "48;5;{}", c.index()),
            SgrParam::DefaultForeground => f.write_str("39"),
            SgrParam::DefaultBackground => f.write_str("49"),
        }
    }
}

/// Parameter group selecting `color` as the foreground (`None` = default).
pub fn foreground_param(color: Option<AnsiColor>) -> SgrParam {
    match color {
        Some(c) => SgrParam::Foreground(c),
        None => SgrParam::DefaultForeground,
    }
}

/// Parameter group selecting `color` as the background (`None` = default).
pub fn background_param(color: Option<AnsiColor>) -> SgrParam {
    match color {
        Some(c) => SgrParam::Background(c),
        None => SgrParam::DefaultBackground,
    }
}

/// Write a single escape sequence joining `params` with `;`.
///
/// Writes nothing if `params` is empty.
pub fn write_sgr(out: &mut impl Write, params: &[SgrParam]) -> fmt::Result {
    let Some((first, rest)) = params.split_first() else {
        return Ok(());
    };
    write!(out, "\x1b[{first}")?;
    for p in rest {
        write!(out, ";{p}")?;
    }
    out.write_char('m')
}

/// Write the codes that take the terminal from `cur` to `new`.
///
/// Only components that differ are touched. The background group always
/// precedes the foreground group.
pub fn write_set_colors(out: &mut impl Write, cur: ColorState, new: ColorState) -> fmt::Result {
    let mut params = [SgrParam::DefaultBackground; 2];
    let mut n = 0;
    if new.bg != cur.bg {
        params[n] = background_param(new.bg);
        n += 1;
    }
    if new.fg != cur.fg {
        params[n] = foreground_param(new.fg);
        n += 1;
    }
    write_sgr(out, &params[..n])
}

/// Escape sequence taking the terminal from `cur` to `new`, or `""`.
pub fn set_colors(cur: ColorState, new: ColorState) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = write_set_colors(&mut s, cur, new);
    s
}

/// Full attribute reset (`ESC[0m`).
pub fn write_reset(out: &mut impl Write) -> fmt::Result {
    ResetColor.write_ansi(out)
}
