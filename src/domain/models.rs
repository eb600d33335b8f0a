use std::path::PathBuf;

/// How the `--pattern` string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Wildcard,
    BasicRegex,
    ExtendedRegex,
}

/// Resolved configuration for one run. Immutable once built.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub directory: PathBuf,
    pub pattern: Option<String>,
    pub match_mode: MatchMode,
    pub delete: bool,
    pub force: bool,
    /// `Some` switches the run to fill mode.
    pub fill_prefix: Option<String>,
    /// Cap on entries considered (scan) or files created (fill).
    pub limit: usize,
}

/// One answer to a deletion prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    Yes,
    No,
    All,
    Quit,
}

/// Mutable confirmation state threaded through the scan loop.
///
/// `auto_confirm_all` is set once by an `all` answer and never cleared,
/// so no further prompts occur for the rest of the run.
#[derive(Debug, Default)]
pub struct ConfirmState {
    pub auto_confirm_all: bool,
}

/// Counters reported after a scan, mainly for logging and tests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub considered: usize,
    pub matched: usize,
    pub deleted: usize,
}
