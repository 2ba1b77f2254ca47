//! Table configuration.

/// Which slots get `glGetError` bound after resolution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorChecking {
    /// No call is followed by an error check.
    Disabled,

    /// Core entry points are checked; extension entry points are not.
    Core,

    /// Every resolved entry point is checked.
    All,
}

impl Default for ErrorChecking {
    fn default() -> Self {
        ErrorChecking::Core
    }
}

/// Options for [`ProcTable::with_config`].
///
/// [`ProcTable::with_config`]: ../proc_table/struct.ProcTable.html#method.with_config
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Post-call error checking policy.
    pub error_checking: ErrorChecking,
}

impl Config {
    /// Returns a copy with a different error checking policy.
    pub fn error_checking(self, error_checking: ErrorChecking) -> Self {
        Config { error_checking, ..self }
    }
}
