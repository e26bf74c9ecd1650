use crate::cell::{expand_tabs, Cell, Glyph};
use crate::error::{GridError, Result};
use crate::mode::Mode;

/// A (row, col) position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular grid of cells with a cursor.
///
/// Every row holds exactly `num_cols` cells and there is always at least one
/// row and one column. Rows are padded with empty cells on the right; the
/// logical end of a row is its rightmost non-empty cell, not `num_cols`.
///
/// The stored cursor column and the column the user sees can differ. The
/// *virtual* column remembers where the user wants to be; vertical motion
/// leaves it alone so the cursor re-aligns when a long row comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Vec<Cell>>,
    num_cols: usize,
    cursor: Position,
    virtual_col: usize,
    mode: Mode,
}

impl Buffer {
    /// Create an empty `rows x cols` grid. Both extents are at least 1.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: vec![vec![Cell::EMPTY; cols]; rows],
            num_cols: cols,
            cursor: Position::default(),
            virtual_col: 0,
            mode: Mode::Normal,
        }
    }

    /// Build a grid from lines of text, expanding tabs into tab runs.
    ///
    /// `width` defaults to the widest expanded line. Longer lines are cut at
    /// `width`; a tab run cut in half is turned into plain spaces so runs
    /// stay well formed.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], width: Option<usize>) -> Self {
        let rows: Vec<Vec<Glyph>> = lines.iter().map(|l| expand_tabs(l.as_ref())).collect();
        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cols = width.unwrap_or(widest).max(1);
        let mut buf = Self::new(rows.len(), cols);

        for (r, mut glyphs) in rows.into_iter().enumerate() {
            glyphs.truncate(cols);
            dissolve_dangling_run(&mut glyphs);
            for (c, glyph) in glyphs.into_iter().enumerate() {
                buf.set(r, c, Cell::new(glyph));
            }
        }
        buf
    }

    // ── Extents and cell access ──────────────────────────────────────

    pub fn num_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.num_rows() && col < self.num_cols
    }

    /// Read a cell. Fails with `OutOfBounds` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<&Cell> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(GridError::OutOfBounds { row, col })
    }

    /// Glyph at a position, `Glyph::Empty` anywhere off the grid.
    pub fn glyph_at(&self, row: usize, col: usize) -> Glyph {
        self.get(row, col).map(|c| c.glyph).unwrap_or_default()
    }

    /// Write a cell. Writes outside the grid are dropped.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// Iterate the rows as cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Highest column holding a non-empty cell, `None` for an empty row.
    pub fn rightmost_occupied(&self, row: usize) -> Option<usize> {
        self.cells
            .get(row)?
            .iter()
            .rposition(|cell| !cell.glyph.is_empty())
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        self.rightmost_occupied(row).is_none()
    }

    // ── Structural changes ───────────────────────────────────────────

    /// Insert an empty row before `at`. `at == num_rows()` appends.
    pub fn insert_row(&mut self, at: usize) {
        let at = at.min(self.num_rows());
        self.cells.insert(at, vec![Cell::EMPTY; self.num_cols]);
    }

    pub fn append_row(&mut self) {
        self.cells.push(vec![Cell::EMPTY; self.num_cols]);
    }

    /// Remove row `at`. The last remaining row is never removed.
    pub fn remove_row(&mut self, at: usize) {
        if at >= self.num_rows() || self.num_rows() <= 1 {
            return;
        }
        self.cells.remove(at);
        if self.cursor.row >= self.num_rows() {
            self.cursor.row = self.num_rows() - 1;
        }
    }

    /// Grow every row by one empty cell.
    pub fn append_column(&mut self) {
        for row in &mut self.cells {
            row.push(Cell::EMPTY);
        }
        self.num_cols += 1;
    }

    /// Append columns until the grid is at least `cols` wide.
    pub fn ensure_cols(&mut self, cols: usize) {
        while self.num_cols < cols {
            self.append_column();
        }
    }

    // ── Mode and cursor ──────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn virtual_col(&self) -> usize {
        self.virtual_col
    }

    /// The cursor as last stored, before clamping to the row.
    pub fn raw_cursor(&self) -> Position {
        self.cursor
    }

    /// The effective cursor: the virtual column clamped to the current row
    /// for the current mode and moved off tab interiors.
    pub fn cursor(&self) -> Position {
        let row = self.cursor.row;
        Position::new(row, self.display_col(row, self.virtual_col))
    }

    /// Column the cursor shows on `row` when it wants to be at `col`.
    ///
    /// Normal mode allows `[0, rightmost]`, Insert mode `[0, rightmost + 1]`,
    /// an empty row only column 0. The result is then snapped to the tab-run
    /// edge the mode allows.
    ///
    /// `set_cursor` grows the grid before storing a one-past column, so a
    /// `col` taken from the cursor is always inside the grid.
    pub fn display_col(&self, row: usize, col: usize) -> usize {
        let Some(rightmost) = self.rightmost_occupied(row) else {
            return 0;
        };
        let max = match self.mode {
            Mode::Normal => rightmost,
            Mode::Insert => rightmost + 1,
        };
        self.snap_to_tab_edge(row, col.min(max), self.mode)
    }

    /// Place the cursor.
    ///
    /// `row` is clamped into the grid. `col` is clamped to the last column, or
    /// one past it in Insert mode, in which case the grid grows a column so
    /// the position exists.
    pub fn set_cursor(&mut self, row: usize, col: usize, update_virtual: bool) {
        let row = row.min(self.num_rows() - 1);
        let col = match self.mode {
            Mode::Normal => col.min(self.num_cols - 1),
            Mode::Insert => {
                let col = col.min(self.num_cols);
                if col == self.num_cols {
                    self.append_column();
                }
                col
            }
        };
        self.cursor = Position::new(row, col);
        if update_virtual {
            self.virtual_col = col;
        }
    }

    /// Move relative to the effective cursor, clamping to the grid.
    /// Only horizontal moves update the virtual column.
    pub fn move_cursor_by(&mut self, dr: isize, dc: isize) {
        let from = self.cursor();
        let row = from.row.saturating_add_signed(dr).min(self.num_rows() - 1);
        let col = from.col.saturating_add_signed(dc).min(self.num_cols - 1);
        self.cursor = Position::new(row, col);
        if dc != 0 {
            self.virtual_col = col;
        }
    }

    // ── Tab runs ─────────────────────────────────────────────────────

    /// Column of the `TabLeft` of the run covering `(row, col)`.
    pub fn tab_start(&self, row: usize, col: usize) -> Option<usize> {
        if !self.glyph_at(row, col).is_tab() {
            return None;
        }
        for c in (0..=col).rev() {
            match self.glyph_at(row, c) {
                Glyph::TabLeft => return Some(c),
                g if g.is_tab() => continue,
                _ => return None,
            }
        }
        None
    }

    /// Column of the `TabRight` of the run covering `(row, col)`.
    pub fn tab_end(&self, row: usize, col: usize) -> Option<usize> {
        if !self.glyph_at(row, col).is_tab() {
            return None;
        }
        for c in col..self.num_cols {
            match self.glyph_at(row, c) {
                Glyph::TabRight => return Some(c),
                g if g.is_tab() => continue,
                _ => return None,
            }
        }
        None
    }

    /// Move `col` to the run edge `mode` may rest on: `TabRight` in Normal
    /// mode, `TabLeft` in Insert mode. Non-tab columns are returned as is.
    pub fn snap_to_tab_edge(&self, row: usize, col: usize, mode: Mode) -> usize {
        let glyph = self.glyph_at(row, col);
        let toward_end = match (mode, glyph) {
            (_, g) if !g.is_tab() => return col,
            (Mode::Normal, Glyph::TabRight) | (Mode::Insert, Glyph::TabLeft) => return col,
            (Mode::Normal, _) => true,
            (Mode::Insert, _) => false,
        };
        let (first, second) = if toward_end {
            (self.tab_end(row, col), self.tab_start(row, col))
        } else {
            (self.tab_start(row, col), self.tab_end(row, col))
        };
        first.or(second).unwrap_or(col)
    }

    // ── Read-out ─────────────────────────────────────────────────────

    /// Row content as text: blanks for padding and tab cells, trailing
    /// padding trimmed.
    pub fn row_text(&self, row: usize) -> String {
        let Some(rightmost) = self.rightmost_occupied(row) else {
            return String::new();
        };
        self.cells[row][..=rightmost]
            .iter()
            .map(|cell| cell.glyph.display())
            .collect()
    }

    pub fn to_lines(&self) -> Vec<String> {
        (0..self.num_rows()).map(|r| self.row_text(r)).collect()
    }

    /// Whether two grids have the same extents and glyphs. Highlights and
    /// cursors are not compared.
    pub fn same_cells(&self, other: &Buffer) -> bool {
        self.num_cols == other.num_cols
            && self.num_rows() == other.num_rows()
            && self
                .rows()
                .zip(other.rows())
                .all(|(a, b)| a.iter().zip(b).all(|(x, y)| x.glyph == y.glyph))
    }

    /// Whether the grids read the same once trailing padding is ignored.
    pub fn same_text(&self, other: &Buffer) -> bool {
        self.to_lines() == other.to_lines()
    }
}

/// Replace a tab run left open by truncation with plain spaces.
fn dissolve_dangling_run(glyphs: &mut [Glyph]) {
    let Some(last) = glyphs.last() else {
        return;
    };
    if !matches!(last, Glyph::TabLeft | Glyph::TabMiddle) {
        return;
    }
    for glyph in glyphs.iter_mut().rev() {
        let was_left = *glyph == Glyph::TabLeft;
        *glyph = Glyph::Plain(' ');
        if was_left {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[&str], width: usize) -> Buffer {
        Buffer::from_lines(lines, Some(width))
    }

    #[test]
    fn test_new_buffer_is_at_least_one_cell() {
        let buf = Buffer::new(0, 0);
        assert_eq!(buf.num_rows(), 1);
        assert_eq!(buf.num_cols(), 1);
        assert_eq!(buf.cursor(), Position::new(0, 0));
        assert_eq!(buf.mode(), Mode::Normal);
    }

    #[test]
    fn test_from_lines_width_defaults_to_widest() {
        let buf = Buffer::from_lines(&["ab", "abcd", ""], None);
        assert_eq!(buf.num_rows(), 3);
        assert_eq!(buf.num_cols(), 4);
        assert_eq!(buf.to_lines(), vec!["ab", "abcd", ""]);
    }

    #[test]
    fn test_from_lines_empty_input() {
        let lines: [&str; 0] = [];
        let buf = Buffer::from_lines(&lines, None);
        assert_eq!(buf.num_rows(), 1);
        assert_eq!(buf.num_cols(), 1);
        assert!(buf.is_row_empty(0));
    }

    #[test]
    fn test_from_lines_truncates_and_pads() {
        let buf = text(&["abcdef", "x"], 3);
        assert_eq!(buf.to_lines(), vec!["abc", "x"]);
        assert_eq!(buf.get(1, 2).map(|c| c.glyph), Ok(Glyph::Empty));
    }

    #[test]
    fn test_truncated_tab_run_becomes_spaces() {
        let buf = text(&["\tx"], 2);
        assert_eq!(buf.glyph_at(0, 0), Glyph::Plain(' '));
        assert_eq!(buf.glyph_at(0, 1), Glyph::Plain(' '));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let buf = text(&["abc"], 3);
        assert_eq!(
            buf.get(0, 3),
            Err(GridError::OutOfBounds { row: 0, col: 3 })
        );
        assert_eq!(
            buf.get(1, 0),
            Err(GridError::OutOfBounds { row: 1, col: 0 })
        );
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut buf = text(&["abc"], 3);
        buf.set(0, 5, Cell::plain('z'));
        buf.set(4, 0, Cell::plain('z'));
        assert_eq!(buf.to_lines(), vec!["abc"]);
        assert_eq!(buf.num_cols(), 3);
    }

    #[test]
    fn test_rightmost_occupied() {
        let buf = text(&["ab", "", "a  "], 5);
        assert_eq!(buf.rightmost_occupied(0), Some(1));
        assert_eq!(buf.rightmost_occupied(1), None);
        assert_eq!(buf.rightmost_occupied(2), Some(2));
        assert_eq!(buf.rightmost_occupied(9), None);
    }

    #[test]
    fn test_structural_changes_keep_rectangle() {
        let mut buf = text(&["ab", "cd"], 2);
        buf.append_column();
        buf.insert_row(1);
        buf.append_row();
        assert_eq!(buf.num_rows(), 4);
        assert!(buf.rows().all(|r| r.len() == 3));
        assert_eq!(buf.to_lines(), vec!["ab", "", "cd", ""]);
    }

    #[test]
    fn test_remove_last_row_is_noop() {
        let mut buf = text(&["only"], 4);
        buf.remove_row(0);
        assert_eq!(buf.num_rows(), 1);
        assert_eq!(buf.to_lines(), vec!["only"]);
    }

    #[test]
    fn test_remove_row_clamps_cursor() {
        let mut buf = text(&["a", "b", "c"], 1);
        buf.set_cursor(2, 0, true);
        buf.remove_row(2);
        assert_eq!(buf.cursor().row, 1);
    }

    #[test]
    fn test_effective_column_normal_mode() {
        let mut buf = text(&["abcdefgh", "abc", ""], 8);
        buf.set_cursor(0, 5, true);
        buf.set_cursor(1, 5, false);
        assert_eq!(buf.cursor(), Position::new(1, 2));
        assert_eq!(buf.virtual_col(), 5);
        buf.set_cursor(2, 5, false);
        assert_eq!(buf.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_effective_column_insert_mode() {
        let mut buf = text(&["abc"], 6);
        buf.set_mode(Mode::Insert);
        buf.set_cursor(0, 5, true);
        assert_eq!(buf.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_set_cursor_insert_one_past_grows() {
        let mut buf = text(&["abc"], 3);
        buf.set_mode(Mode::Insert);
        buf.set_cursor(0, 3, true);
        assert_eq!(buf.num_cols(), 4);
        assert_eq!(buf.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_insert_one_past_on_full_rows() {
        let mut buf = text(&["abcd", "wxyz"], 4);
        buf.set_mode(Mode::Insert);
        buf.set_cursor(0, 4, true);
        assert_eq!(buf.num_cols(), 5);
        assert_eq!(buf.display_col(1, buf.virtual_col()), 4);
        buf.set_cursor(1, 4, false);
        assert_eq!(buf.num_cols(), 5);
        assert_eq!(buf.cursor(), Position::new(1, 4));
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut buf = text(&["abc", "def"], 3);
        buf.set_cursor(10, 10, true);
        assert_eq!(buf.raw_cursor(), Position::new(1, 2));
        assert_eq!(buf.virtual_col(), 2);
    }

    #[test]
    fn test_move_cursor_by() {
        let mut buf = text(&["abcdef", "ab"], 6);
        buf.move_cursor_by(0, 4);
        assert_eq!(buf.cursor(), Position::new(0, 4));
        buf.move_cursor_by(1, 0);
        assert_eq!(buf.cursor(), Position::new(1, 1));
        assert_eq!(buf.virtual_col(), 4);
        buf.move_cursor_by(-5, -100);
        assert_eq!(buf.cursor(), Position::new(0, 0));
        assert_eq!(buf.virtual_col(), 0);
    }

    #[test]
    fn test_tab_run_bounds() {
        let buf = text(&["a\tb"], 6);
        assert_eq!(buf.tab_start(0, 3), Some(1));
        assert_eq!(buf.tab_end(0, 2), Some(3));
        assert_eq!(buf.tab_start(0, 0), None);
        assert_eq!(buf.tab_end(0, 4), None);
    }

    #[test]
    fn test_cursor_never_rests_inside_tab_run() {
        let mut buf = text(&["\tx"], 5);
        buf.set_cursor(0, 1, true);
        assert_eq!(buf.cursor().col, 3);
        buf.set_mode(Mode::Insert);
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_same_cells_ignores_highlight() {
        let a = text(&["abc"], 3);
        let mut b = a.clone();
        b.set(0, 1, Cell::plain('b').with_highlight(Some(crate::cell::Highlight::Match)));
        assert!(a.same_cells(&b));
        b.set(0, 1, Cell::plain('x'));
        assert!(!a.same_cells(&b));
    }

    #[test]
    fn test_same_text_ignores_width() {
        let a = text(&["abc"], 3);
        let b = text(&["abc"], 6);
        assert!(!a.same_cells(&b));
        assert!(a.same_text(&b));
    }
}
