pub mod command;
pub mod edit;
pub mod motion;

use command::{Command, CommandBuffer, Step};
use motion::{LineJump, WordMotion};

use crossterm::event::KeyEvent;
use tracing::{debug, trace};

use crate::buffer::{Buffer, Position};
use crate::input::{Key, KeyInput};
use crate::mode::Mode;

// ── Dispatch result ──────────────────────────────────────────────────

/// What happened to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Modifier chord or unmapped key. Nothing changed.
    Ignored,
    /// Part of an unfinished Normal-mode command.
    Pending,
    /// The key ran a motion or an edit.
    Executed,
    /// The typed sequence was not a command and has been dropped.
    Discarded,
    /// The key switched modes.
    ModeChanged(Mode),
}

// ── Interpreter ──────────────────────────────────────────────────────

/// Drives one [`Buffer`] from key presses.
///
/// Each call processes one key to completion. In Normal mode keys go
/// through a [`CommandBuffer`] so counts and two-key commands can build
/// up; Insert mode handles each key directly. Arrow keys bypass both.
#[derive(Debug, Clone)]
pub struct Interpreter {
    buffer: Buffer,
    commands: CommandBuffer,
}

impl Interpreter {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            commands: CommandBuffer::new(),
        }
    }

    /// Shorthand for `Interpreter::new(Buffer::from_lines(lines, width))`.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], width: Option<usize>) -> Self {
        Self::new(Buffer::from_lines(lines, width))
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }

    pub fn mode(&self) -> Mode {
        self.buffer.mode()
    }

    pub fn cursor(&self) -> Position {
        self.buffer.cursor()
    }

    /// Keys of an unfinished Normal-mode command, e.g. `"2d"`.
    pub fn pending(&self) -> &str {
        self.commands.pending()
    }

    /// Drop any unfinished command.
    pub fn reset_pending(&mut self) {
        self.commands.clear();
    }

    // ── Key handling ─────────────────────────────────────────────────

    pub fn handle_key(&mut self, event: KeyEvent) -> Dispatch {
        match KeyInput::from_event(event) {
            Some(input) => self.handle_input(input),
            None => Dispatch::Ignored,
        }
    }

    pub fn handle_input(&mut self, input: KeyInput) -> Dispatch {
        if input.chord {
            return Dispatch::Ignored;
        }
        trace!(key = ?input.key, mode = ?self.mode(), "key");

        match input.key {
            Key::Left => self.arrow(motion::left),
            Key::Right => self.arrow(motion::right),
            Key::Up => self.arrow(motion::up),
            Key::Down => self.arrow(motion::down),
            key => match self.mode() {
                Mode::Normal => self.handle_normal_key(key),
                Mode::Insert => self.handle_insert_key(key),
            },
        }
    }

    fn arrow(&mut self, motion: fn(&mut Buffer)) -> Dispatch {
        motion(&mut self.buffer);
        Dispatch::Executed
    }

    fn handle_normal_key(&mut self, key: Key) -> Dispatch {
        match self.commands.push(key) {
            Step::Wait => Dispatch::Pending,
            Step::Discard => {
                debug!(?key, "discarded command sequence");
                Dispatch::Discarded
            }
            Step::Execute { command, count } => self.execute(command, count),
        }
    }

    fn handle_insert_key(&mut self, key: Key) -> Dispatch {
        let buf = &mut self.buffer;
        match key {
            Key::Escape => {
                edit::switch_mode(buf, Mode::Normal);
                debug!("mode switched to normal");
                return Dispatch::ModeChanged(Mode::Normal);
            }
            Key::Enter => edit::insert_newline(buf),
            Key::Tab => edit::insert_tab(buf),
            Key::Backspace => edit::backspace(buf),
            Key::Char(c @ ' '..='~') => edit::insert_char(buf, c),
            _ => return Dispatch::Ignored,
        }
        Dispatch::Executed
    }

    // ── Command execution ────────────────────────────────────────────

    fn execute(&mut self, command: Command, count: Option<usize>) -> Dispatch {
        debug!(?command, ?count, "execute");
        let times = if command.is_repeatable() {
            count.unwrap_or(1)
        } else {
            1
        };
        let mut result = Dispatch::Executed;
        for _ in 0..times {
            result = self.execute_once(command, count);
        }
        result
    }

    fn execute_once(&mut self, command: Command, count: Option<usize>) -> Dispatch {
        let buf = &mut self.buffer;
        match command {
            Command::Left => motion::left(buf),
            Command::Right => motion::right(buf),
            Command::Up => motion::up(buf),
            Command::Down => motion::down(buf),
            Command::LineStart => motion::line_start(buf),
            Command::LineEnd => motion::line_end(buf),
            Command::WordForward { big } => motion::word(buf, WordMotion::Forward, big),
            Command::WordEnd { big } => motion::word(buf, WordMotion::EndForward, big),
            Command::WordBackward { big } => motion::word(buf, WordMotion::Backward, big),
            Command::WordEndBackward { big } => motion::word(buf, WordMotion::EndBackward, big),
            Command::ScreenTop => motion::jump_to_line(buf, LineJump::Top, count),
            Command::ScreenMiddle => motion::jump_to_line(buf, LineJump::Middle, count),
            Command::ScreenBottom => motion::jump_to_line(buf, LineJump::Bottom, count),
            Command::FirstLine => motion::jump_to_line(buf, LineJump::First, count),
            Command::LastLine => motion::jump_to_line(buf, LineJump::Last, count),
            Command::DeleteChar => edit::delete_chars(buf, count.unwrap_or(1)),
            Command::DeleteLine => edit::delete_line(buf),
            Command::Replace(c) => edit::replace(buf, c, count.unwrap_or(1)),
            Command::Insert | Command::InsertLineStart => {
                if command == Command::InsertLineStart {
                    let row = buf.cursor().row;
                    buf.set_cursor(row, 0, true);
                }
                edit::switch_mode(buf, Mode::Insert);
                debug!("mode switched to insert");
                return Dispatch::ModeChanged(Mode::Insert);
            }
        }
        Dispatch::Executed
    }
}
