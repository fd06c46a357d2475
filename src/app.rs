use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::{event, keyboard, time, window, Event, Subscription, Task};

use crate::api::ApiClient;
use crate::application::{
    Command, DiskSaver, Dispatcher, DownloadCoordinator, HttpDownloader, KeyCombos,
};
use crate::config::Settings;
use crate::domain::{AppError, BinaryOutcome, DownloadOutcome};
use crate::progress::ProgressBar;
use crate::ui::{DownloadMessage, DownloadView, ToastBoard};

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

pub struct DownloadApp {
    view: DownloadView,
    settings: Settings,
    api_client: ApiClient,
    progress: ProgressBar,
    toasts: ToastBoard,
    combos: KeyCombos,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new(Settings::from_env())
    }
}

impl DownloadApp {
    pub fn new(settings: Settings) -> Self {
        let api_client = ApiClient::new(settings.api.clone());
        let view = DownloadView {
            download_dir: settings.download_dir.display().to_string(),
            ..Default::default()
        };

        Self {
            view,
            settings,
            api_client,
            progress: ProgressBar::new(),
            toasts: ToastBoard::new(),
            combos: KeyCombos::default(),
        }
    }

    fn dispatcher(&self) -> Dispatcher {
        let dir = self.settings.download_dir.clone();
        let coordinator = DownloadCoordinator::new(
            Arc::new(self.api_client.clone()),
            Arc::new(HttpDownloader::new(self.api_client.clone(), dir.clone())),
            Arc::new(DiskSaver::new(dir)),
            Arc::new(self.toasts.clone()),
            self.progress.clone(),
        );
        Dispatcher::new(coordinator)
    }

    fn start(&mut self, command: Command) -> Task<Message> {
        let dispatcher = self.dispatcher();
        let context = self.view.page_url.trim().to_string();
        tracing::debug!(?command, context = %context, "command triggered");

        // iced runs the future on its tokio executor
        Task::perform(
            async move { describe(dispatcher.execute(command, &context).await) },
            Message::CommandFinished,
        )
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// A character key pressed while no widget had focus
    KeyPressed(String),
    /// Status line for a finished command
    CommandFinished(String),
    FolderSelected(Option<PathBuf>),
    Tick,
}

fn describe(result: Result<Option<DownloadOutcome>, AppError>) -> String {
    match result {
        Ok(None) => "Test notification shown".to_string(),
        Ok(Some(DownloadOutcome::WrongContext)) => "Not a video page".to_string(),
        Ok(Some(DownloadOutcome::Completed {
            base_filename,
            binary,
            ..
        })) => match binary {
            BinaryOutcome::Failed(e) => {
                format!("Saved metadata for {}, video failed: {}", base_filename, e)
            }
            BinaryOutcome::Skipped => format!("Saved metadata: {}", base_filename),
            BinaryOutcome::Saved(_) => format!("Saved: {}", base_filename),
        },
        Err(e) => format!("Failed: {}", e),
    }
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DownloadMessage::DownloadPressed => return app.start(Command::DownloadAll),
                DownloadMessage::MetadataPressed => return app.start(Command::MetadataOnly),
                DownloadMessage::TestPressed => return app.start(Command::TestNotification),
                DownloadMessage::ChooseFolderPressed => {
                    return Task::perform(
                        async {
                            rfd::AsyncFileDialog::new()
                                .pick_folder()
                                .await
                                .map(|handle| handle.path().to_path_buf())
                        },
                        Message::FolderSelected,
                    );
                }
                DownloadMessage::PageUrlChanged(_) => {}
            }
        }
        Message::KeyPressed(key) => {
            if let Some(command) = app.combos.press(&key) {
                return app.start(command);
            }
        }
        Message::CommandFinished(status) => {
            app.view.status_message = status;
        }
        Message::FolderSelected(Some(dir)) => {
            tracing::info!(dir = %dir.display(), "download folder changed");
            app.view.download_dir = dir.display().to_string();
            app.settings.download_dir = dir;
        }
        Message::FolderSelected(None) => {
            // User cancelled dialog
        }
        Message::Tick => {}
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view
        .view(app.progress.snapshot(), &app.toasts.visible(Instant::now()))
        .map(Message::UiMessage)
}

pub fn subscription(_app: &DownloadApp) -> Subscription<Message> {
    Subscription::batch([
        event::listen_with(key_event),
        // Progress and toasts change outside of update
        time::every(REDRAW_INTERVAL).map(|_| Message::Tick),
    ])
}

fn key_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    if matches!(status, event::Status::Captured) {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Character(c),
            ..
        }) => Some(Message::KeyPressed(c.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(Ok(None)), "Test notification shown");
        assert_eq!(
            describe(Ok(Some(DownloadOutcome::WrongContext))),
            "Not a video page"
        );
        assert_eq!(
            describe(Ok(Some(DownloadOutcome::Completed {
                base_filename: "Bob - k - T".to_string(),
                sidecar: PathBuf::from("Bob - k - T.json"),
                binary: BinaryOutcome::Skipped,
            }))),
            "Saved metadata: Bob - k - T"
        );
        assert_eq!(
            describe(Err(AppError::EmptyPayload)),
            "Failed: API returned an empty payload"
        );
    }
}
