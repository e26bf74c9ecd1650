//! Cursor motions over a [`Buffer`].
//!
//! Word scanning walks the grid cell by cell in reading order, visiting
//! columns `0..=rightmost` of each row. An empty row is visited once, at
//! column 0.

use crate::buffer::{Buffer, Position};
use crate::cell::Glyph;
use crate::mode::Mode;

// ── Horizontal ───────────────────────────────────────────────────────

/// `h` / Left. Never lands inside a tab run: Normal mode skips a run it
/// starts on, Insert mode stops on the run's `TabLeft`.
pub fn left(buf: &mut Buffer) {
    let Position { row, col } = buf.cursor();
    if col == 0 {
        return;
    }
    let mode = buf.mode();
    if let Some(start) = buf.tab_start(row, col).filter(|&start| start < col) {
        let target = match mode {
            Mode::Insert => start,
            Mode::Normal => start.saturating_sub(1),
        };
        buf.set_cursor(row, target, true);
        return;
    }
    let target = buf.snap_to_tab_edge(row, col - 1, mode);
    buf.set_cursor(row, target, true);
}

/// `l` / Right. Bounded by the rightmost occupied cell in Normal mode and
/// one past it in Insert mode. Does nothing on an empty row.
pub fn right(buf: &mut Buffer) {
    let Position { row, col } = buf.cursor();
    let Some(rightmost) = buf.rightmost_occupied(row) else {
        return;
    };
    let mode = buf.mode();
    if let Some(end) = buf.tab_end(row, col).filter(|&end| end > col) {
        let target = match mode {
            Mode::Normal => end,
            Mode::Insert => end + 1,
        };
        buf.set_cursor(row, target, true);
        return;
    }
    let max = match mode {
        Mode::Normal => rightmost,
        Mode::Insert => rightmost + 1,
    };
    if col < max {
        let target = buf.snap_to_tab_edge(row, col + 1, mode);
        buf.set_cursor(row, target, true);
    }
}

/// `0`.
pub fn line_start(buf: &mut Buffer) {
    let cols = isize::try_from(buf.num_cols()).unwrap_or(isize::MAX);
    buf.move_cursor_by(0, -cols);
}

/// `$`: ask for the last column and let clamping settle on the row end.
/// The virtual column stays at the far end so vertical moves keep to row
/// ends; the stored column is the one shown.
pub fn line_end(buf: &mut Buffer) {
    let cols = isize::try_from(buf.num_cols()).unwrap_or(isize::MAX);
    buf.move_cursor_by(0, cols);
    let Position { row, col } = buf.cursor();
    buf.set_cursor(row, col, false);
}

// ── Vertical ─────────────────────────────────────────────────────────

/// `k` / Up.
pub fn up(buf: &mut Buffer) {
    let row = buf.cursor().row.saturating_sub(1);
    vertical_to(buf, row);
}

/// `j` / Down.
pub fn down(buf: &mut Buffer) {
    let row = buf.cursor().row + 1;
    vertical_to(buf, row);
}

/// Move to `row`, showing the virtual column as far as the row allows.
/// The virtual column itself is kept.
fn vertical_to(buf: &mut Buffer, row: usize) {
    let row = row.min(buf.num_rows() - 1);
    let col = buf.display_col(row, buf.virtual_col());
    buf.set_cursor(row, col, false);
}

// ── Line jumps ───────────────────────────────────────────────────────

/// Which row a line jump targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJump {
    /// `H`: first row, or row `count - 1`.
    Top,
    /// `M`: the middle row.
    Middle,
    /// `L`: last row, or `count - 1` rows above it.
    Bottom,
    /// `gg`: row `count - 1`, first row without a count.
    First,
    /// `G`: row `count - 1` for counts above 1, otherwise the last row.
    Last,
}

impl LineJump {
    pub fn target_row(self, count: Option<usize>, num_rows: usize) -> usize {
        let last = num_rows.saturating_sub(1);
        let row = match (self, count) {
            (Self::Top, n) | (Self::First, n) => n.unwrap_or(1).saturating_sub(1),
            (Self::Middle, _) => last / 2,
            (Self::Bottom, n) => last.saturating_sub(n.unwrap_or(1).saturating_sub(1)),
            (Self::Last, Some(n)) if n > 1 => n - 1,
            (Self::Last, _) => last,
        };
        row.min(last)
    }
}

/// Jump to a row and land on its first non-whitespace cell.
pub fn jump_to_line(buf: &mut Buffer, jump: LineJump, count: Option<usize>) {
    let row = jump.target_row(count, buf.num_rows());
    let col = first_non_blank(buf, row);
    buf.set_cursor(row, col, true);
}

/// Column a line jump lands on.
///
/// The leftmost non-whitespace cell; on an all-whitespace row the left edge
/// of the rightmost tab run, else the rightmost whitespace cell; 0 on an
/// empty row.
pub fn first_non_blank(buf: &Buffer, row: usize) -> usize {
    let Some(rightmost) = buf.rightmost_occupied(row) else {
        return 0;
    };
    let glyphs: Vec<Glyph> = (0..=rightmost).map(|c| buf.glyph_at(row, c)).collect();
    if let Some(col) = glyphs.iter().position(|g| !g.is_blank()) {
        return col;
    }
    if let Some(col) = glyphs.iter().rposition(|&g| g == Glyph::TabLeft) {
        return col;
    }
    glyphs.iter().rposition(|g| g.is_whitespace()).unwrap_or(0)
}

// ── Word motions ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Blank,
    /// Letters, digits and underscore, or any non-blank for WORD motions.
    Word,
    /// Any other non-blank. Every punctuation cell is a word of its own.
    Punctuation,
}

pub fn char_class(glyph: Glyph, big: bool) -> CharClass {
    match glyph {
        g if g.is_blank() => CharClass::Blank,
        _ if big => CharClass::Word,
        Glyph::Plain(c) if c.is_alphanumeric() || c == '_' => CharClass::Word,
        _ => CharClass::Punctuation,
    }
}

/// Reading-order walk over the occupied cells of a buffer.
struct Scan<'a> {
    buf: &'a Buffer,
    big: bool,
}

impl Scan<'_> {
    fn class(&self, pos: Position) -> CharClass {
        char_class(self.buf.glyph_at(pos.row, pos.col), self.big)
    }

    fn is_empty_row(&self, row: usize) -> bool {
        self.buf.is_row_empty(row)
    }

    fn next(&self, pos: Position) -> Option<Position> {
        let rightmost = self.buf.rightmost_occupied(pos.row).unwrap_or(0);
        if pos.col < rightmost {
            Some(Position::new(pos.row, pos.col + 1))
        } else if pos.row + 1 < self.buf.num_rows() {
            Some(Position::new(pos.row + 1, 0))
        } else {
            None
        }
    }

    fn prev(&self, pos: Position) -> Option<Position> {
        if pos.col > 0 {
            let rightmost = self.buf.rightmost_occupied(pos.row).unwrap_or(0);
            Some(Position::new(pos.row, (pos.col - 1).min(rightmost)))
        } else if pos.row > 0 {
            let row = pos.row - 1;
            Some(Position::new(row, self.buf.rightmost_occupied(row).unwrap_or(0)))
        } else {
            None
        }
    }

    /// Next cell on the same row with the same word class.
    fn next_in_word(&self, pos: Position, class: CharClass) -> Option<Position> {
        if class != CharClass::Word {
            return None;
        }
        self.next(pos)
            .filter(|n| n.row == pos.row && self.class(*n) == class)
    }

    fn prev_in_word(&self, pos: Position, class: CharClass) -> Option<Position> {
        if class != CharClass::Word {
            return None;
        }
        self.prev(pos)
            .filter(|p| p.row == pos.row && self.class(*p) == class)
    }

    /// Last cell of the word at `pos`.
    fn word_end(&self, mut pos: Position) -> Position {
        let class = self.class(pos);
        while let Some(n) = self.next_in_word(pos, class) {
            pos = n;
        }
        pos
    }

    /// First cell of the word at `pos`.
    fn word_start(&self, mut pos: Position) -> Position {
        let class = self.class(pos);
        while let Some(p) = self.prev_in_word(pos, class) {
            pos = p;
        }
        pos
    }

    /// `w`: start of the next word, or an empty row in between.
    fn word_forward(&self, from: Position) -> Option<Position> {
        let mut pos = from;
        if self.class(pos) != CharClass::Blank {
            pos = self.word_end(pos);
        }
        pos = self.next(pos)?;
        loop {
            if self.is_empty_row(pos.row) || self.class(pos) != CharClass::Blank {
                return Some(pos);
            }
            pos = self.next(pos)?;
        }
    }

    /// `e`: end of the current word when inside one, else of the next word.
    /// Empty rows are skipped.
    fn word_end_forward(&self, from: Position) -> Option<Position> {
        let mut pos = self.next(from)?;
        while self.class(pos) == CharClass::Blank {
            pos = self.next(pos)?;
        }
        Some(self.word_end(pos))
    }

    /// `b`: start of the current word when inside one, else of the
    /// previous word, or an empty row in between.
    fn word_backward(&self, from: Position) -> Option<Position> {
        let mut pos = self.prev(from)?;
        while self.class(pos) == CharClass::Blank {
            if self.is_empty_row(pos.row) {
                return Some(pos);
            }
            pos = self.prev(pos)?;
        }
        Some(self.word_start(pos))
    }

    /// `ge`: end of the previous word, or an empty row in between.
    fn word_end_backward(&self, from: Position) -> Option<Position> {
        let mut pos = from;
        if self.class(pos) != CharClass::Blank {
            pos = self.word_start(pos);
        }
        pos = self.prev(pos)?;
        loop {
            if self.is_empty_row(pos.row) || self.class(pos) != CharClass::Blank {
                return Some(pos);
            }
            pos = self.prev(pos)?;
        }
    }
}

/// Direction and anchor of a word motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMotion {
    Forward,
    EndForward,
    Backward,
    EndBackward,
}

/// Where a word motion lands from `from`, `None` at the edge of the buffer.
pub fn find_word(buf: &Buffer, from: Position, motion: WordMotion, big: bool) -> Option<Position> {
    let scan = Scan { buf, big };
    match motion {
        WordMotion::Forward => scan.word_forward(from),
        WordMotion::EndForward => scan.word_end_forward(from),
        WordMotion::Backward => scan.word_backward(from),
        WordMotion::EndBackward => scan.word_end_backward(from),
    }
}

/// Run a word motion from the cursor. Nothing moves at the buffer edge.
pub fn word(buf: &mut Buffer, motion: WordMotion, big: bool) {
    if let Some(pos) = find_word(buf, buf.cursor(), motion, big) {
        buf.set_cursor(pos.row, pos.col, true);
    }
}
