//! ANSI palette for program dumps.

use std::fmt::Display;

/// One escape code per dump role. `OFF` renders plain text for snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Section headers (`[types]`, `[unions]`).
    pub section: &'static str,
    /// Operation names and union key constants.
    pub op: &'static str,
    /// Size bounds.
    pub size: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        section: "\x1b[34m",
        op: "\x1b[32m",
        size: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        section: "",
        op: "",
        size: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// `text` wrapped in `role` and a reset. `role` is one of this palette's fields.
    pub fn paint(&self, role: &str, text: impl Display) -> String {
        format!("{role}{text}{}", self.reset)
    }
}
