//! Text mutations over a [`Buffer`].
//!
//! Edits work from the effective cursor and keep the grid rectangular.
//! Edits that need room append columns; none ever removes one.

use crate::buffer::{Buffer, Position};
use crate::cell::{Cell, Glyph, TAB_SIZE};
use crate::mode::Mode;

use super::motion;

// ── Insert mode ──────────────────────────────────────────────────────

/// Insert `c` at the cursor and advance past it.
pub fn insert_char(buf: &mut Buffer, c: char) {
    let Position { row, col } = buf.cursor();
    if col + 1 >= buf.num_cols() {
        buf.append_column();
    }
    if let Some(rightmost) = buf.rightmost_occupied(row).filter(|&r| r >= col) {
        buf.ensure_cols(rightmost + 2);
        shift_right(buf, row, col, rightmost, 1);
    }
    buf.set(row, col, Cell::plain(c));
    buf.set_cursor(row, col + 1, true);
}

/// Insert a tab run reaching the next tab stop.
///
/// A gap of a single cell gets a space instead. The cursor ends just past
/// the run in Insert mode and on its `TabRight` in Normal mode.
pub fn insert_tab(buf: &mut Buffer) {
    let Position { row, col } = buf.cursor();
    let next_stop = (col / TAB_SIZE + 1) * TAB_SIZE;
    let distance = next_stop - col;
    if distance == 1 {
        insert_char(buf, ' ');
        return;
    }

    let rightmost = buf.rightmost_occupied(row);
    let max_needed = match rightmost {
        Some(r) => next_stop.max(r + distance),
        None => next_stop,
    };
    buf.ensure_cols(max_needed + 1);

    if let Some(rightmost) = rightmost.filter(|&r| r >= col) {
        shift_right(buf, row, col, rightmost, distance);
    }
    buf.set(row, col, Cell::new(Glyph::TabLeft));
    for c in col + 1..next_stop - 1 {
        buf.set(row, c, Cell::new(Glyph::TabMiddle));
    }
    buf.set(row, next_stop - 1, Cell::new(Glyph::TabRight));

    let target = match buf.mode() {
        Mode::Insert => next_stop,
        Mode::Normal => next_stop - 1,
    };
    buf.set_cursor(row, target, true);
}

/// Split the row at the cursor. Content at or after the cursor moves to a
/// new row below; the cursor lands at its start.
pub fn insert_newline(buf: &mut Buffer) {
    let Position { row, col } = buf.cursor();
    buf.insert_row(row + 1);
    if let Some(rightmost) = buf.rightmost_occupied(row).filter(|&r| r >= col) {
        for c in col..=rightmost {
            let cell = cell_at(buf, row, c);
            buf.set(row + 1, c - col, cell);
            buf.set(row, c, Cell::EMPTY);
        }
    }
    buf.set_cursor(row + 1, 0, true);
}

/// Delete the cell before the cursor.
///
/// At column 0 the row is joined onto the previous one. A tab run before
/// the cursor is deleted whole.
pub fn backspace(buf: &mut Buffer) {
    let Position { row, col } = buf.cursor();
    if col == 0 {
        if row > 0 {
            join_with_previous(buf, row);
        }
        return;
    }
    let (start, len) = unit_at(buf, row, col - 1);
    delete_cells(buf, row, start, len);
    buf.set_cursor(row, start, true);
}

/// Append row `row` to the end of the row above and remove it.
fn join_with_previous(buf: &mut Buffer, row: usize) {
    let prev = row - 1;
    let join_col = buf.rightmost_occupied(prev).map_or(0, |r| r + 1);
    if let Some(rightmost) = buf.rightmost_occupied(row) {
        buf.ensure_cols(join_col + rightmost + 2);
        for c in 0..=rightmost {
            let cell = cell_at(buf, row, c);
            buf.set(prev, join_col + c, cell);
        }
    }
    buf.remove_row(row);
    buf.set_cursor(prev, join_col, true);
}

// ── Normal mode ──────────────────────────────────────────────────────

/// `x` repeated `count` times.
///
/// Every deletion happens at the column the first one started from, so a
/// count never eats text left of the cursor. Deleting stops once nothing is
/// left at or after that column. A tab run is deleted whole.
pub fn delete_chars(buf: &mut Buffer, count: usize) {
    let Position { row, col } = buf.cursor();
    if buf.rightmost_occupied(row).is_none_or(|r| col > r) {
        return;
    }
    let anchor = unit_at(buf, row, col).0;
    for _ in 0..count.max(1) {
        match buf.rightmost_occupied(row) {
            Some(rightmost) if rightmost >= anchor => {
                let (start, len) = unit_at(buf, row, anchor);
                delete_cells(buf, row, start, len);
            }
            _ => break,
        }
    }
    buf.set_cursor(row, anchor, true);
}

/// `r{c}` repeated `count` times.
///
/// The range starts at the stored cursor column when that sits in padding
/// past the row's content, and at the effective cursor otherwise. All
/// target cells must lie inside the grid or nothing is written. Tab runs
/// the range cuts into are turned into spaces first. The cursor ends on the
/// last replaced cell.
pub fn replace(buf: &mut Buffer, c: char, count: usize) {
    let Position { row, col } = buf.cursor();
    let stored = buf.raw_cursor().col;
    let in_padding = buf.rightmost_occupied(row).is_none_or(|r| stored > r);
    let col = if in_padding && stored < buf.num_cols() {
        stored
    } else {
        col
    };
    let count = count.max(1);
    let last = col + count - 1;
    if last >= buf.num_cols() {
        return;
    }
    for target in col..=last {
        dissolve_tab_run(buf, row, target);
    }
    for target in col..=last {
        buf.set(row, target, Cell::plain(c));
    }
    buf.set_cursor(row, last, true);
}

/// `dd`: remove the cursor row. The last remaining row is left alone.
pub fn delete_line(buf: &mut Buffer) {
    if buf.num_rows() == 1 {
        return;
    }
    let row = buf.cursor().row;
    buf.remove_row(row);
    let row = row.min(buf.num_rows() - 1);
    let col = motion::first_non_blank(buf, row);
    buf.set_cursor(row, col, true);
}

// ── Mode switches ────────────────────────────────────────────────────

/// Switch modes, settling the cursor where the new mode shows it: back onto
/// the content when leaving Insert mode, and onto the tab-run edge the new
/// mode allows.
pub fn switch_mode(buf: &mut Buffer, mode: Mode) {
    let Position { row, col } = buf.cursor();
    buf.set_mode(mode);
    let settled = buf.display_col(row, col);
    buf.set_cursor(row, settled, true);
}

// ── Helpers ──────────────────────────────────────────────────────────

fn cell_at(buf: &Buffer, row: usize, col: usize) -> Cell {
    buf.get(row, col).copied().unwrap_or_default()
}

/// Start and length of the unit covering `(row, col)`: the whole tab run
/// for tab cells, the single cell otherwise.
fn unit_at(buf: &Buffer, row: usize, col: usize) -> (usize, usize) {
    match (buf.tab_start(row, col), buf.tab_end(row, col)) {
        (Some(start), Some(end)) => (start, end - start + 1),
        _ => (col, 1),
    }
}

/// Move cells `from..=to` right by `by`, last cell first.
fn shift_right(buf: &mut Buffer, row: usize, from: usize, to: usize, by: usize) {
    for c in (from..=to).rev() {
        let cell = cell_at(buf, row, c);
        buf.set(row, c + by, cell);
    }
}

/// Remove `len` cells at `start` and pull the rest of the row left.
fn delete_cells(buf: &mut Buffer, row: usize, start: usize, len: usize) {
    let Some(rightmost) = buf.rightmost_occupied(row) else {
        return;
    };
    for c in start..=rightmost {
        let cell = if c + len <= rightmost {
            cell_at(buf, row, c + len)
        } else {
            Cell::EMPTY
        };
        buf.set(row, c, cell);
    }
}

/// Turn the tab run covering `(row, col)`, if any, into spaces.
fn dissolve_tab_run(buf: &mut Buffer, row: usize, col: usize) {
    let (Some(start), Some(end)) = (buf.tab_start(row, col), buf.tab_end(row, col)) else {
        return;
    };
    for c in start..=end {
        buf.set(row, c, Cell::plain(' '));
    }
}
