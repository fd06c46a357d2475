mod api;
mod app;
mod application;
mod config;
mod domain;
mod logging;
mod progress;
mod ui;
mod utils;

fn main() -> iced::Result {
    if let Err(err) = logging::init_logging() {
        eprintln!("failed to initialize logging: {}", err);
    }

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("PMVHaven Downloader")
        .subscription(app::subscription)
        .run()
}
