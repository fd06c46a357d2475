pub mod toast;

use iced::{
    widget::{button, column, progress_bar, row, text, text_input, Column, Space},
    Element, Length,
};

use crate::progress::ProgressSnapshot;

pub use toast::ToastBoard;

/// Main view state
pub struct DownloadView {
    pub page_url: String,
    pub status_message: String,
    pub download_dir: String,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            page_url: String::new(),
            status_message: "Paste a video page URL, then press v d (video + metadata) or v i (metadata only)".to_string(),
            download_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    PageUrlChanged(String),
    DownloadPressed,
    MetadataPressed,
    TestPressed,
    ChooseFolderPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::PageUrlChanged(url) => {
                self.page_url = url;
            }
            DownloadMessage::DownloadPressed
            | DownloadMessage::MetadataPressed
            | DownloadMessage::TestPressed
            | DownloadMessage::ChooseFolderPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn view(&self, progress: ProgressSnapshot, toasts: &[String]) -> Element<'_, DownloadMessage> {
        let bar: Element<'_, DownloadMessage> = if progress.hidden {
            Space::new().height(Length::Fixed(4.0)).into()
        } else {
            progress_bar(0.0..=100.0, progress.percent).into()
        };

        let toasts = Column::with_children(
            toasts
                .iter()
                .map(|message| text(message.clone()).size(14).into()),
        )
        .spacing(6);

        column![
            bar,
            text("PMVHaven Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Video page:").size(16),
            text_input("https://pmvhaven.com/video/...", &self.page_url)
                .on_input(DownloadMessage::PageUrlChanged)
                .padding(10),
            text(format!("Saving to: {}", self.download_dir)).size(14),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
            row![
                button("Video + metadata")
                    .on_press(DownloadMessage::DownloadPressed)
                    .padding([10, 20]),
                button("Metadata only")
                    .on_press(DownloadMessage::MetadataPressed)
                    .padding([10, 20]),
                button("Test notification")
                    .on_press(DownloadMessage::TestPressed)
                    .padding([10, 20]),
                button("Choose folder")
                    .on_press(DownloadMessage::ChooseFolderPressed)
                    .padding([10, 20]),
            ]
            .spacing(10),
            Space::new().height(Length::Fixed(20.0)),
            toasts,
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}
