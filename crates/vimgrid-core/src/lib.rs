pub mod buffer;
pub mod cell;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod mode;
pub mod ui;

pub use buffer::{Buffer, Position};
pub use cell::{Cell, Glyph, Highlight};
pub use error::GridError;
pub use input::{Key, KeyInput};
pub use interpreter::{Dispatch, Interpreter};
pub use mode::Mode;
