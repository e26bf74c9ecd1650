//! Incremental parser for Normal-mode command sequences.
//!
//! Keys are fed one at a time. Each key either completes a command, leaves
//! the parser waiting for more input, or makes the sequence invalid, in
//! which case everything typed so far is thrown away.

use crate::input::Key;

/// Counts above this are clamped.
const MAX_COUNT: usize = 99_999;

/// A complete Normal-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    /// `w` / `W`.
    WordForward { big: bool },
    /// `e` / `E`.
    WordEnd { big: bool },
    /// `b` / `B`.
    WordBackward { big: bool },
    /// `ge` / `gE`.
    WordEndBackward { big: bool },
    /// `H`.
    ScreenTop,
    /// `M`.
    ScreenMiddle,
    /// `L`.
    ScreenBottom,
    /// `gg`.
    FirstLine,
    /// `G`.
    LastLine,
    /// `i`.
    Insert,
    /// `I`.
    InsertLineStart,
    /// `x`.
    DeleteChar,
    /// `dd`.
    DeleteLine,
    /// `r{char}`.
    Replace(char),
}

impl Command {
    /// Whether a count repeats the command. Jumps, `x` and `r` read the
    /// count as an argument instead and run once.
    pub fn is_repeatable(self) -> bool {
        !matches!(
            self,
            Self::ScreenTop
                | Self::ScreenMiddle
                | Self::ScreenBottom
                | Self::FirstLine
                | Self::LastLine
                | Self::Insert
                | Self::InsertLineStart
                | Self::DeleteChar
                | Self::Replace(_)
        )
    }
}

/// Result of feeding one key to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A command is complete. `count` is `None` when no digits were typed.
    Execute {
        command: Command,
        count: Option<usize>,
    },
    /// The sequence is a valid prefix; keep collecting keys.
    Wait,
    /// The sequence can never complete. The parser is back to idle.
    Discard,
}

/// Keys that start a two-key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Delete,
    Yank,
    Change,
    G,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Idle,
    Count(usize),
    Prefix {
        prefix: Prefix,
        count: Option<usize>,
    },
}

/// Accumulates counts and multi-key commands.
#[derive(Debug, Clone)]
pub struct CommandBuffer {
    state: ParseState,
    typed: String,
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            state: ParseState::Idle,
            typed: String::new(),
        }
    }

    /// Text typed since the last complete or discarded command.
    pub fn pending(&self) -> &str {
        &self.typed
    }

    pub fn is_idle(&self) -> bool {
        self.state == ParseState::Idle
    }

    pub fn clear(&mut self) {
        self.state = ParseState::Idle;
        self.typed.clear();
    }

    /// Feed one key.
    pub fn push(&mut self, key: Key) -> Step {
        let step = match self.state {
            ParseState::Idle => self.push_idle(key),
            ParseState::Count(n) => self.push_count(key, n),
            ParseState::Prefix { prefix, count } => Self::push_prefix(key, prefix, count),
        };
        match step {
            Step::Wait => {
                if let Key::Char(c) = key {
                    self.typed.push(c);
                }
            }
            Step::Execute { .. } | Step::Discard => self.clear(),
        }
        step
    }

    fn push_idle(&mut self, key: Key) -> Step {
        match key {
            Key::Char(c @ '1'..='9') => {
                self.state = ParseState::Count(digit(c));
                Step::Wait
            }
            _ => self.start(key, None),
        }
    }

    fn push_count(&mut self, key: Key, n: usize) -> Step {
        match key {
            Key::Char(c @ '0'..='9') => {
                let n = n.saturating_mul(10).saturating_add(digit(c)).min(MAX_COUNT);
                self.state = ParseState::Count(n);
                Step::Wait
            }
            _ => self.start(key, Some(n)),
        }
    }

    /// First key after an optional count.
    fn start(&mut self, key: Key, count: Option<usize>) -> Step {
        let execute = |command| Step::Execute { command, count };
        let prefix = match key {
            Key::Char('h') => return execute(Command::Left),
            Key::Char('l') => return execute(Command::Right),
            Key::Char('j') | Key::Enter => return execute(Command::Down),
            Key::Char('k') => return execute(Command::Up),
            Key::Char('0') => return execute(Command::LineStart),
            Key::Char('$') => return execute(Command::LineEnd),
            Key::Char('w') => return execute(Command::WordForward { big: false }),
            Key::Char('W') => return execute(Command::WordForward { big: true }),
            Key::Char('e') => return execute(Command::WordEnd { big: false }),
            Key::Char('E') => return execute(Command::WordEnd { big: true }),
            Key::Char('b') => return execute(Command::WordBackward { big: false }),
            Key::Char('B') => return execute(Command::WordBackward { big: true }),
            Key::Char('H') => return execute(Command::ScreenTop),
            Key::Char('M') => return execute(Command::ScreenMiddle),
            Key::Char('L') => return execute(Command::ScreenBottom),
            Key::Char('G') => return execute(Command::LastLine),
            Key::Char('i') => return execute(Command::Insert),
            Key::Char('I') => return execute(Command::InsertLineStart),
            Key::Char('x') => return execute(Command::DeleteChar),
            Key::Char('d') => Prefix::Delete,
            Key::Char('y') => Prefix::Yank,
            Key::Char('c') => Prefix::Change,
            Key::Char('g') => Prefix::G,
            Key::Char('r') => Prefix::Replace,
            _ => return Step::Discard,
        };
        self.state = ParseState::Prefix { prefix, count };
        Step::Wait
    }

    fn push_prefix(key: Key, prefix: Prefix, count: Option<usize>) -> Step {
        let command = match (prefix, key) {
            (Prefix::Delete, Key::Char('d')) => Command::DeleteLine,
            (Prefix::G, Key::Char('g')) => Command::FirstLine,
            (Prefix::G, Key::Char('e')) => Command::WordEndBackward { big: false },
            (Prefix::G, Key::Char('E')) => Command::WordEndBackward { big: true },
            (Prefix::G, Key::Char('j')) => Command::Down,
            (Prefix::G, Key::Char('k')) => Command::Up,
            (Prefix::Replace, Key::Char(c @ ' '..='~')) => Command::Replace(c),
            _ => return Step::Discard,
        };
        Step::Execute { command, count }
    }
}

fn digit(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize)
}
