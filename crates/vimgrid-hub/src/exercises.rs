use vimgrid_core::Buffer;

/// A starting grid and the grid the player has to turn it into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub name: &'static str,
    /// Suggested keys, shown in the title bar.
    pub hint: &'static str,
    pub start: &'static [&'static str],
    pub target: &'static [&'static str],
}

impl Exercise {
    /// Column count shared by both panels: the widest expanded line of either grid.
    pub fn width(&self) -> usize {
        let widest = |lines: &[&str]| Buffer::from_lines(lines, None).num_cols();
        widest(self.start).max(widest(self.target))
    }

    /// Build the (player, target) buffers, optionally at a fixed width.
    pub fn buffers(&self, width: Option<usize>) -> (Buffer, Buffer) {
        let width = width.unwrap_or_else(|| self.width());
        (
            Buffer::from_lines(self.start, Some(width)),
            Buffer::from_lines(self.target, Some(width)),
        )
    }
}

pub const EXERCISES: &[Exercise] = &[
    Exercise {
        name: "Delete a line",
        hint: "j dd",
        start: &["keep this line", "delete this line", "keep this one too"],
        target: &["keep this line", "keep this one too"],
    },
    Exercise {
        name: "Fix the typo",
        hint: "w i Esc",
        start: &["say helo world"],
        target: &["say hello world"],
    },
    Exercise {
        name: "Replace characters",
        hint: "l r",
        start: &["a-b-c-d"],
        target: &["a+b+c+d"],
    },
    Exercise {
        name: "Indent with a tab",
        hint: "j I Tab Esc",
        start: &["fn main() {", "println!(\"hi\");", "}"],
        target: &["fn main() {", "\tprintln!(\"hi\");", "}"],
    },
    Exercise {
        name: "Trim the middle",
        hint: "w 10x",
        start: &["one two three four"],
        target: &["one four"],
    },
    Exercise {
        name: "Split a line",
        hint: "e l x i Enter Esc",
        start: &["first second"],
        target: &["first", "second"],
    },
    Exercise {
        name: "Join two lines",
        hint: "j I Backspace Space Esc",
        start: &["hello", "world"],
        target: &["hello world"],
    },
    Exercise {
        name: "Jump around",
        hint: "3G $ x",
        start: &["alpha", "beta", "gamma!", "delta"],
        target: &["alpha", "beta", "gamma", "delta"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exercises_are_not_already_solved() {
        for exercise in EXERCISES {
            let (player, target) = exercise.buffers(None);
            assert!(!player.same_text(&target), "{} starts solved", exercise.name);
        }
    }

    #[test]
    fn test_width_covers_both_grids() {
        let tab = EXERCISES
            .iter()
            .find(|e| e.name == "Indent with a tab")
            .expect("exercise");
        assert_eq!(tab.width(), 19);
        let (player, target) = tab.buffers(None);
        assert_eq!(player.num_cols(), target.num_cols());
    }

    #[test]
    fn test_width_override() {
        let (player, target) = EXERCISES[0].buffers(Some(40));
        assert_eq!(player.num_cols(), 40);
        assert_eq!(target.num_cols(), 40);
    }
}
