//! Compiler configuration.

use serde::Deserialize;
use wirecast_core::Colors;

/// Configuration for a compilation session.
///
/// Integer widths are fixed (8/16/32/64-bit little-endian) and the variable
/// array length prefix is always a 4-byte `u32`; neither is configurable.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Namespace prefix applied to every emitted identifier
    pub(crate) prefix: String,
    /// Emit the implicit `global_any_of` union over all records
    pub(crate) global_any_of: bool,
    /// Generate per-type layouts on the rayon pool
    pub(crate) parallel: bool,
    /// Color configuration for dumps
    #[serde(skip)]
    pub(crate) colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            global_any_of: false,
            parallel: true,
            colors: Colors::OFF,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier prefix (e.g. `fooey_`).
    pub fn prefix(mut self, value: impl Into<String>) -> Self {
        self.prefix = value.into();
        self
    }

    /// Set whether to emit the implicit union over all records.
    pub fn global_any_of(mut self, value: bool) -> Self {
        self.global_any_of = value;
        self
    }

    /// Set whether layout generation runs in parallel.
    pub fn parallel(mut self, value: bool) -> Self {
        self.parallel = value;
        self
    }

    /// Set whether to use colored output.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn name_prefix(&self) -> &str {
        &self.prefix
    }
}
