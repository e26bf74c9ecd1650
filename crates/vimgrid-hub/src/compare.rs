//! Cell-by-cell comparison of the player grid against the target.
//!
//! Whitespace is normalised: empty padding, spaces and tab cells all count
//! as the same blank. Positions outside one of the grids read as blank.

use vimgrid_core::{Buffer, Glyph, Highlight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub matches: usize,
    pub total: usize,
}

impl Comparison {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.matches == self.total
    }

    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.matches * 100 / self.total
    }
}

pub fn glyphs_match(a: Glyph, b: Glyph) -> bool {
    (a.is_blank() && b.is_blank()) || a == b
}

/// Compare over the union of both grids' extents.
pub fn compare(expected: &Buffer, actual: &Buffer) -> Comparison {
    let rows = expected.num_rows().max(actual.num_rows());
    let cols = expected.num_cols().max(actual.num_cols());
    let mut result = Comparison {
        matches: 0,
        total: 0,
    };
    for r in 0..rows {
        for c in 0..cols {
            result.total += 1;
            if glyphs_match(expected.glyph_at(r, c), actual.glyph_at(r, c)) {
                result.matches += 1;
            }
        }
    }
    result
}

/// Tag every target cell: `Mismatch` where the player differs, `Match`
/// everywhere once the grids agree, nothing otherwise.
pub fn mark_target(target: &mut Buffer, player: &Buffer, solved: bool) {
    for r in 0..target.num_rows() {
        for c in 0..target.num_cols() {
            let Ok(cell) = target.get(r, c).copied() else {
                continue;
            };
            let highlight = if solved {
                Some(Highlight::Match)
            } else if glyphs_match(cell.glyph, player.glyph_at(r, c)) {
                None
            } else {
                Some(Highlight::Mismatch)
            };
            target.set(r, c, cell.with_highlight(highlight));
        }
    }
}
