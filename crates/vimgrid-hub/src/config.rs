use anyhow::{Result, bail};
use clap::Parser;

/// Command-line configuration for the trainer.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "vimgrid")]
#[command(about = "Reproduce the target grid using vim commands")]
pub struct HubConfig {
    /// Panel width in columns (defaults to the widest line of the exercise)
    #[arg(long)]
    pub width: Option<usize>,

    /// Exercise to start with, counting from 1
    #[arg(long, default_value_t = 1)]
    pub exercise: usize,
}

impl HubConfig {
    /// Zero-based index of the starting exercise, checked against `available`.
    pub fn exercise_index(&self, available: usize) -> Result<usize> {
        if self.exercise == 0 || self.exercise > available {
            bail!(
                "exercise {} does not exist (choose 1 to {available})",
                self.exercise
            );
        }
        Ok(self.exercise - 1)
    }

    /// Width override, ignoring a zero width.
    pub fn width(&self) -> Option<usize> {
        self.width.filter(|&w| w > 0)
    }
}
