//! Meet-Tracker: native-messaging host that keeps the meeting history for
//! the browser extension.

mod app;
mod app_command;
mod config;
mod error;
mod file_store;
mod frame_reader;
mod host_message;
mod logging;
mod native_messaging;
mod response_writer;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    file_store::FileStore,
    frame_reader::FrameReader,
    host_message::{HostMessage, HostResponse},
    response_writer::ResponseWriter,
};

use crate::config::Config;

use meet_tracker_core::MeetingLedger;

use tokio::sync::mpsc;
use tracing::{error, info};

/// Application entry point.
#[tokio::main]
async fn main() {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            // Logging is configured by the file we failed to load.
            eprintln!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let log_dir = Config::log_dir().ok();
    let _log_guard = match logging::init(&config.logging, log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:?}", e);
            std::process::exit(1);
        }
    };

    info!(storage = ?config.storage.path, key = %config.storage.key, "Configuration loaded");

    if let Err(e) = config.prepare_storage_dir() {
        error!(error = ?e, "Failed to prepare storage directory");
        std::process::exit(1);
    }

    let store = FileStore::new(&config.storage.path);
    info!(path = ?store.path(), "Using file store");
    let ledger = MeetingLedger::new(store, config.storage.key.clone())
        .with_max_write_attempts(config.ledger.max_write_attempts);

    let (command_tx, command_rx) = mpsc::channel(32);
    let (response_tx, response_rx) = mpsc::channel(32);

    let frame_reader = FrameReader::new(command_tx);
    let response_writer = ResponseWriter::new(response_rx);
    let app = App {
        ledger,
        badge_style: config.badge.style(),
        command_rx,
        response_tx,
    };

    tokio::join!(
        async {
            if let Err(e) = frame_reader.run(tokio::io::stdin()).await {
                error!(error = ?e, "Frame reader error");
            }
        },
        async {
            if let Err(e) = app.run().await {
                error!(error = ?e, "App error");
            }
        },
        async {
            if let Err(e) = response_writer.run(tokio::io::stdout()).await {
                error!(error = ?e, "Response writer error");
            }
        }
    );
}
