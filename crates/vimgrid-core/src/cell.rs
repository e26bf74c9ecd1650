//! Grid cells and the tab-run encoding.
//!
//! A tab typed by the user occupies a run of cells: one `TabLeft`, any
//! number of `TabMiddle` and one `TabRight`. All three render as blanks.
//! The cursor may rest on `TabLeft` (Insert mode) or `TabRight` (Normal
//! mode) but never on `TabMiddle`.

/// Width of a full tab stop.
pub const TAB_SIZE: usize = 4;

/// What a single cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Glyph {
    /// Padding to the right of the row content.
    #[default]
    Empty,
    Plain(char),
    TabLeft,
    TabMiddle,
    TabRight,
}

impl Glyph {
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_tab(self) -> bool {
        matches!(self, Self::TabLeft | Self::TabMiddle | Self::TabRight)
    }

    /// Whitespace for line-jump purposes: spaces and tab cells.
    pub fn is_whitespace(self) -> bool {
        match self {
            Self::Plain(c) => c.is_whitespace(),
            Self::TabLeft | Self::TabMiddle | Self::TabRight => true,
            Self::Empty => false,
        }
    }

    /// Blank for word motions: empty, whitespace or part of a tab run.
    pub fn is_blank(self) -> bool {
        self.is_empty() || self.is_whitespace()
    }

    /// The character a renderer should paint.
    pub fn display(self) -> char {
        match self {
            Self::Plain(c) => c,
            Self::Empty | Self::TabLeft | Self::TabMiddle | Self::TabRight => ' ',
        }
    }
}

/// Semantic highlight tag attached to a cell. Renderers map it to a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Cell agrees with the reference grid.
    Match,
    /// Cell differs from the reference grid.
    Mismatch,
}

/// One grid cell. Cells are small values and are replaced wholesale on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub glyph: Glyph,
    pub highlight: Option<Highlight>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        glyph: Glyph::Empty,
        highlight: None,
    };

    pub fn new(glyph: Glyph) -> Self {
        Self {
            glyph,
            highlight: None,
        }
    }

    pub fn plain(c: char) -> Self {
        Self::new(Glyph::Plain(c))
    }

    pub fn with_highlight(self, highlight: Option<Highlight>) -> Self {
        Self { highlight, ..self }
    }
}

/// Expand the tabs of one line of text into glyphs.
///
/// Each tab pads to the next multiple of [`TAB_SIZE`]. A tab one cell short
/// of a stop still produces a two-cell `TabLeft, TabRight` run and pushes the
/// following text one column past the stop.
pub fn expand_tabs(line: &str) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(line.len());
    for c in line.chars() {
        if c != '\t' {
            glyphs.push(Glyph::Plain(c));
            continue;
        }
        let col = glyphs.len();
        let next_stop = (col / TAB_SIZE + 1) * TAB_SIZE;
        let distance = next_stop - col;
        glyphs.push(Glyph::TabLeft);
        for _ in 2..distance {
            glyphs.push(Glyph::TabMiddle);
        }
        glyphs.push(Glyph::TabRight);
    }
    glyphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tab_at_line_start() {
        assert_eq!(
            expand_tabs("\tx"),
            vec![
                Glyph::TabLeft,
                Glyph::TabMiddle,
                Glyph::TabMiddle,
                Glyph::TabRight,
                Glyph::Plain('x'),
            ]
        );
    }

    #[test]
    fn test_expand_tab_mid_line() {
        let glyphs = expand_tabs("a\tb");
        assert_eq!(glyphs.len(), 5);
        assert_eq!(glyphs[1], Glyph::TabLeft);
        assert_eq!(glyphs[2], Glyph::TabMiddle);
        assert_eq!(glyphs[3], Glyph::TabRight);
        assert_eq!(glyphs[4], Glyph::Plain('b'));
    }

    #[test]
    fn test_expand_tab_one_short_of_stop() {
        let glyphs = expand_tabs("abc\td");
        assert_eq!(
            &glyphs[3..],
            &[Glyph::TabLeft, Glyph::TabRight, Glyph::Plain('d')]
        );
    }

    #[test]
    fn test_blank_classes() {
        assert!(Glyph::Empty.is_blank());
        assert!(Glyph::Plain(' ').is_blank());
        assert!(Glyph::TabMiddle.is_blank());
        assert!(!Glyph::Plain('x').is_blank());
        assert!(!Glyph::Empty.is_whitespace());
        assert_eq!(Glyph::TabRight.display(), ' ');
    }
}
