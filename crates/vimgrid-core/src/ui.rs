use crate::buffer::Buffer;
use crate::cell::{Cell, Highlight};
use crate::mode::Mode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

/// Painted in place of characters that do not occupy exactly one column.
const PLACEHOLDER: char = '?';

/// Standard layout: title bar (1 line) + main content + status bar (1 line).
/// Returns (title_area, content_area, status_area).
pub fn standard_layout(area: Rect) -> (Rect, Rect, Rect) {
    let [title_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    (title_area, content_area, status_area)
}

/// Create a bordered block for a grid panel. Focused panels get a solid border.
pub fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Render a buffer inside a titled panel.
///
/// The view scrolls to keep the cursor visible. When `focused` the terminal
/// cursor is placed on the buffer cursor.
pub fn render_buffer(frame: &mut Frame, area: Rect, buffer: &Buffer, title: &str, focused: bool) {
    let block = panel_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let cursor = buffer.cursor();
    let height = inner.height as usize;
    let width = inner.width as usize;
    let row_offset = scroll_offset(cursor.row, height);
    let col_offset = scroll_offset(cursor.col, width);

    let lines: Vec<Line> = buffer
        .rows()
        .skip(row_offset)
        .take(height)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .skip(col_offset)
                .take(width)
                .map(|cell| Span::styled(cell_symbol(cell).to_string(), cell_style(cell)))
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if focused {
        let x = inner.x + (cursor.col - col_offset) as u16;
        let y = inner.y + (cursor.row - row_offset) as u16;
        frame.set_cursor_position((x, y));
    }
}

/// Render the bottom status bar: mode, panel title, pending keys and info.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: Mode,
    title: &str,
    pending: &str,
    info: &str,
) {
    let mode_style = match mode {
        Mode::Normal => Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        Mode::Insert => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", mode.label()), mode_style),
        Span::raw(" "),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(pending, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(info, Style::default().add_modifier(Modifier::DIM)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn scroll_offset(pos: usize, visible: usize) -> usize {
    if pos >= visible { pos - visible + 1 } else { 0 }
}

fn cell_symbol(cell: &Cell) -> char {
    let c = cell.glyph.display();
    if c.width() == Some(1) { c } else { PLACEHOLDER }
}

fn cell_style(cell: &Cell) -> Style {
    match cell.highlight {
        None => Style::default(),
        Some(Highlight::Match) => Style::default().fg(Color::Green),
        Some(Highlight::Mismatch) => Style::default().fg(Color::Black).bg(Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(buffer: &Buffer, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|f| render_buffer(f, f.area(), buffer, "grid", true))
            .expect("draw");
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_render_buffer_draws_cells_inside_border() {
        let buffer = Buffer::from_lines(&["ab", "c"], Some(3));
        let terminal = draw(&buffer, 7, 4);
        assert!(row_text(&terminal, 0).contains("grid"));
        assert_eq!(row_text(&terminal, 1), "│ab   │");
        assert_eq!(row_text(&terminal, 2), "│c    │");
    }

    #[test]
    fn test_render_buffer_tabs_are_blank() {
        let buffer = Buffer::from_lines(&["\tx"], Some(5));
        let terminal = draw(&buffer, 7, 3);
        assert_eq!(row_text(&terminal, 1), "│    x│");
    }

    #[test]
    fn test_render_buffer_scrolls_to_cursor() {
        let mut buffer = Buffer::from_lines(&["a", "b", "c", "d"], Some(1));
        buffer.set_cursor(3, 0, true);
        let terminal = draw(&buffer, 3, 4);
        assert_eq!(row_text(&terminal, 1), "│c│");
        assert_eq!(row_text(&terminal, 2), "│d│");
    }

    #[test]
    fn test_wide_characters_use_placeholder() {
        let buffer = Buffer::from_lines(&["a中"], Some(2));
        let terminal = draw(&buffer, 4, 3);
        assert_eq!(row_text(&terminal, 1), "│a?│");
    }

    #[test]
    fn test_highlight_styles() {
        assert_eq!(cell_style(&Cell::plain('x')), Style::default());
        let mismatch = Cell::plain('x').with_highlight(Some(Highlight::Mismatch));
        assert_eq!(cell_style(&mismatch).bg, Some(Color::Red));
    }

    #[test]
    fn test_status_bar_shows_mode_and_pending() {
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).expect("terminal");
        terminal
            .draw(|f| render_status_bar(f, f.area(), Mode::Insert, "player", "2d", "SOLVED"))
            .expect("draw");
        let text = row_text(&terminal, 0);
        assert!(text.starts_with(" INSERT "));
        assert!(text.contains("player"));
        assert!(text.contains("2d"));
        assert!(text.contains("SOLVED"));
    }
}
