//! Inbound side of the native-messaging pipe.
//!
//! Reads frames from the browser, decodes them into [`HostMessage`]s and
//! queues them for the app. Decoding happens here so the app only ever sees
//! typed commands.

use crate::{AppCommand, AppError, AppResult, host_message::InboundFrame, native_messaging};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;
use tokio::{io::AsyncRead, sync::mpsc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Reads frames and forwards them to the app's command queue.
pub struct FrameReader {
    command_tx: mpsc::Sender<AppCommand>,
}

impl FrameReader {
    /// Create a reader feeding `command_tx`.
    pub fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Read until the pipe closes or breaks, then request shutdown.
    ///
    /// Consumes the reader so the command sender is dropped on return and
    /// the app stops even if the shutdown command cannot be queued.
    #[instrument(skip(self, reader))]
    pub async fn run<R>(self, mut reader: R) -> AppResult<()>
    where
        R: AsyncRead + Unpin,
    {
        match self.forward_frames(&mut reader).await {
            Ok(()) => {
                info!("Browser closed the pipe");
                self.send(AppCommand::Shutdown).await
            }
            Err(e) => {
                warn!(error = %e, "Inbound stream failed, shutting down");
                if self.send(AppCommand::Shutdown).await.is_err() {
                    debug!("App already gone");
                }
                Err(e)
            }
        }
    }

    async fn forward_frames<R>(&self, reader: &mut R) -> AppResult<()>
    where
        R: AsyncRead + Unpin,
    {
        while let Some(frame) = native_messaging::read_frame(reader).await? {
            self.send(decode(&frame)).await?;
        }

        Ok(())
    }

    async fn send(&self, command: AppCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to queue command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Turn one frame into a command, keeping the extension's `requestId` even
/// when the rest of the frame is unusable.
pub(crate) fn decode(frame: &[u8]) -> AppCommand {
    let request_id = Uuid::new_v4();

    match serde_json::from_slice::<InboundFrame>(frame) {
        Ok(InboundFrame {
            request_id: reply_to,
            message,
        }) => {
            debug!(request_id = %request_id, ?reply_to, action = message.action(), "Frame decoded");
            AppCommand::Handle {
                request_id,
                reply_to,
                message,
            }
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, bytes = frame.len(), "Undecodable frame");
            AppCommand::Malformed {
                request_id,
                reply_to: salvage_request_id(frame),
                reason: e.to_string(),
            }
        }
    }
}

fn salvage_request_id(frame: &[u8]) -> Option<String> {
    let value = serde_json::from_slice::<Value>(frame).ok()?;
    value.get("requestId")?.as_str().map(str::to_string)
}
