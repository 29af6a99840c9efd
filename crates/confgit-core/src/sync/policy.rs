//! Write policy for changed entries

/// Who decides whether a changed entry is written.
///
/// Exactly one mode governs each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Ask per entry; a bare answer means no
    #[default]
    Interactive,
    /// Report only, never write
    DryRun,
    /// Write every changed entry without asking
    AssumeYes,
    /// Write nothing without asking
    AssumeNo,
}

/// What to do with one entry once its verdict is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Skip,
    Copy,
    Prompt,
}

/// Options for a backup or restore pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyPolicy {
    /// Treat every entry as changed, bypassing change detection. Whether the
    /// entry is then written is still up to `mode`.
    pub force: bool,
    pub mode: WriteMode,
}

impl CopyPolicy {
    pub fn new(mode: WriteMode) -> Self {
        Self { force: false, mode }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Resolve the action for an entry. `changed` is the detector's verdict.
    pub fn action(&self, changed: bool) -> Action {
        if !(changed || self.force) {
            return Action::Skip;
        }
        match self.mode {
            WriteMode::DryRun | WriteMode::AssumeNo => Action::Skip,
            WriteMode::AssumeYes => Action::Copy,
            WriteMode::Interactive => Action::Prompt,
        }
    }

    /// Whether the reporter should be asked about the entry at all.
    pub fn is_interactive(&self) -> bool {
        self.mode == WriteMode::Interactive
    }
}
