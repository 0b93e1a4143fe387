use std::fmt;

/// Where a layout update is. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    Idle,
    CheckingExistence,
    FetchingToken,
    Updating,
    Succeeded,
    Failed,
}

impl UpdatePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UpdatePhase::Succeeded | UpdatePhase::Failed)
    }
}

impl fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdatePhase::Idle => "idle",
            UpdatePhase::CheckingExistence => "checking-existence",
            UpdatePhase::FetchingToken => "fetching-token",
            UpdatePhase::Updating => "updating",
            UpdatePhase::Succeeded => "succeeded",
            UpdatePhase::Failed => "failed",
        };
        f.write_str(name)
    }
}
