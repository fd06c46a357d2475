use crate::domain::{AppError, DownloadMode, DownloadOutcome};

use super::download_coordinator::{messages, DownloadCoordinator};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `v d`
    DownloadAll,
    /// `v i`
    MetadataOnly,
    /// `v t`
    TestNotification,
}

impl Command {
    pub fn mode(self) -> Option<DownloadMode> {
        match self {
            Command::DownloadAll => Some(DownloadMode::Full),
            Command::MetadataOnly => Some(DownloadMode::MetadataOnly),
            Command::TestNotification => None,
        }
    }
}

const LEADER: &str = "v";

/// Two-key shortcut matcher: `v` followed by `d`, `i` or `t`.
///
/// A combo fires once and clears, so holding the second key does not repeat it.
#[derive(Debug, Default)]
pub struct KeyCombos {
    leader_down: bool,
}

impl KeyCombos {
    pub fn press(&mut self, key: &str) -> Option<Command> {
        let key = key.to_lowercase();
        if !self.leader_down {
            self.leader_down = key == LEADER;
            return None;
        }

        self.leader_down = false;
        match key.as_str() {
            "d" => Some(Command::DownloadAll),
            "i" => Some(Command::MetadataOnly),
            "t" => Some(Command::TestNotification),
            LEADER => {
                self.leader_down = true;
                None
            }
            _ => None,
        }
    }
}

/// Runs commands against a coordinator and applies the top-level failure policy.
///
/// There is no in-flight guard: a second command started while one is running
/// proceeds independently and shares the same progress bar.
#[derive(Clone)]
pub struct Dispatcher {
    coordinator: DownloadCoordinator,
}

impl Dispatcher {
    pub fn new(coordinator: DownloadCoordinator) -> Self {
        Self { coordinator }
    }

    /// `context` is the page the command was issued on.
    pub async fn execute(
        &self,
        command: Command,
        context: &str,
    ) -> Result<Option<DownloadOutcome>, AppError> {
        let Some(mode) = command.mode() else {
            self.coordinator.notify(messages::TEST);
            return Ok(None);
        };

        match self.coordinator.run(context, mode).await {
            Ok(outcome) => {
                tracing::debug!(?command, progress = ?self.coordinator.progress().state(), "command finished");
                Ok(Some(outcome))
            }
            Err(e) => {
                tracing::error!(error = %e, ?command, "error during download");
                self.coordinator.progress().reset();
                Err(e)
            }
        }
    }
}
