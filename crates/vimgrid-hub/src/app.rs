use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::info;
use vimgrid_core::{Buffer, Dispatch, Interpreter, ui};

use crate::compare::{self, Comparison};
use crate::exercises::Exercise;

/// The main application state.
pub struct App {
    exercises: &'static [Exercise],
    /// Index of the exercise being played.
    current: usize,
    /// Panel width override from the command line.
    width: Option<usize>,
    /// The grid the player edits.
    player: Interpreter,
    /// Read-only grid the player has to reproduce, highlighted against `player`.
    target: Buffer,
    comparison: Comparison,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    pub fn new(exercises: &'static [Exercise], start: usize, width: Option<usize>) -> Self {
        let mut app = Self {
            exercises,
            current: 0,
            width,
            player: Interpreter::new(Buffer::new(1, 1)),
            target: Buffer::new(1, 1),
            comparison: Comparison {
                matches: 0,
                total: 0,
            },
            should_quit: false,
        };
        app.load(start);
        app
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercises[self.current]
    }

    pub fn is_solved(&self) -> bool {
        self.comparison.is_perfect()
    }

    /// Replace both grids with a fresh copy of exercise `index`.
    fn load(&mut self, index: usize) {
        self.current = index.min(self.exercises.len().saturating_sub(1));
        let exercise = self.exercise();
        let (player, target) = exercise.buffers(self.width);
        info!(exercise = exercise.name, "loading exercise");
        self.player = Interpreter::new(player);
        self.target = target;
        self.refresh();
    }

    fn next_exercise(&mut self) {
        let next = (self.current + 1) % self.exercises.len();
        self.load(next);
    }

    fn prev_exercise(&mut self) {
        let prev = if self.current == 0 {
            self.exercises.len() - 1
        } else {
            self.current - 1
        };
        self.load(prev);
    }

    /// Re-grade after the player grid changed.
    fn refresh(&mut self) {
        let was_solved = self.is_solved();
        self.comparison = compare::compare(&self.target, self.player.buffer());
        let solved = self.is_solved();
        compare::mark_target(&mut self.target, self.player.buffer(), solved);
        if solved && !was_solved {
            info!(exercise = self.exercise().name, "exercise solved");
        }
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Release {
                return;
            }
            if key.modifiers == KeyModifiers::CONTROL && self.handle_control_key(key) {
                return;
            }

            match self.player.handle_key(key) {
                Dispatch::Executed | Dispatch::ModeChanged(_) => self.refresh(),
                Dispatch::Ignored | Dispatch::Pending | Dispatch::Discarded => {}
            }
        }
    }

    /// Hub chords. Returns false for chords the hub does not own.
    fn handle_control_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('n') => self.next_exercise(),
            KeyCode::Char('p') => self.prev_exercise(),
            KeyCode::Char('r') => self.load(self.current),
            _ => return false,
        }
        true
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (title_area, content_area, status_area) = ui::standard_layout(area);

        let exercise = self.exercise();
        let title = Line::from(vec![
            Span::styled(
                format!(
                    " {}/{} {} ",
                    self.current + 1,
                    self.exercises.len(),
                    exercise.name
                ),
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            Span::raw("  "),
            Span::styled(
                format!("try: {}", exercise.hint),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);

        let [player_area, target_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(content_area);
        ui::render_buffer(frame, player_area, self.player.buffer(), "Your grid", true);
        ui::render_buffer(frame, target_area, &self.target, "Target", false);

        let info = if self.is_solved() {
            "SOLVED  C-n: next  C-q: quit".to_string()
        } else {
            format!(
                "match {}%  C-r: reset  C-n/C-p: exercise  C-q: quit",
                self.comparison.percent()
            )
        };
        ui::render_status_bar(
            frame,
            status_area,
            self.player.mode(),
            "vimgrid",
            self.player.pending(),
            &info,
        );
    }
}
