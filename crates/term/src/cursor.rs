//! Cursor-move planner.
//!
//! `x` positions are absolute (0 = start of line) while `y` positions are
//! relative: moving from `y = 2` to `y = 5` means "three lines down", not
//! "to row 5 of the screen". Screen height is never known at draw time.
//!
//! Only local choices are made here: each displacement gets the cheapest of a
//! few equivalent encodings, in draw order. Reordering draws to shorten the
//! total output is a variant of the asymmetric traveling salesman path
//! problem and is not attempted.

use std::fmt::{self, Write};

use crossterm::{
    cursor::{MoveDown, MoveLeft, MoveRight, MoveToNextLine, MoveToPreviousLine, MoveUp},
    Command,
};

use crate::types::CursorPos;

/// Write `cmd(n)` for a distance that may not fit a single `u16` parameter.
fn write_repeated<C: Command>(out: &mut impl Write, dist: u32, cmd: fn(u16) -> C) -> fmt::Result {
    let mut left = dist;
    while left > 0 {
        let step = left.min(u16::MAX as u32) as u16;
        cmd(step).write_ansi(out)?;
        left -= step as u32;
    }
    Ok(())
}

/// Byte length of `ESC[<n>E`.
fn next_line_code_len(n: u32) -> u32 {
    let digits = n.checked_ilog10().unwrap_or(0) + 1;
    3 + digits
}

/// Move down `dist` lines and put x at the start of the line.
///
/// Uses `ESC[<n>E` unless `dist` line feeds are strictly shorter. On a tie the
/// escape code wins.
pub fn write_down_to_line_start(out: &mut impl Write, dist: u32) -> fmt::Result {
    if dist < next_line_code_len(dist) {
        for _ in 0..dist {
            out.write_char('\n')?;
        }
        Ok(())
    } else {
        write_repeated(out, dist, MoveToNextLine)
    }
}

/// Write the codes moving the cursor from `from` to `to`.
pub fn write_move(out: &mut impl Write, from: CursorPos, to: CursorPos) -> fmt::Result {
    let mut x = from.x;
    let dy = from.y.abs_diff(to.y);

    if from.y < to.y {
        if x == to.x {
            if to.x != 0 {
                // A line feed would send x to 0; keep the column instead.
                return write_repeated(out, dy, MoveDown);
            }
            return write_down_to_line_start(out, dy);
        }
        write_down_to_line_start(out, dy)?;
        if to.x == 0 {
            return Ok(());
        }
        x = 0;
    } else if from.y > to.y {
        if to.x == 0 {
            return write_repeated(out, dy, MoveToPreviousLine);
        }
        write_repeated(out, dy, MoveUp)?;
    }

    if x < to.x {
        MoveRight(to.x - x).write_ansi(out)?;
    } else if x > to.x {
        MoveLeft(x - to.x).write_ansi(out)?;
    }
    Ok(())
}

/// Codes moving the cursor from `from` to `to`, as an owned string.
pub fn move_cursor(from: CursorPos, to: CursorPos) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = write_move(&mut s, from, to);
    s
}
