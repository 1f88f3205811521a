//! Outbound side of the native-messaging pipe.

use crate::{AppError, AppResult, HostResponse, native_messaging};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::{io::AsyncWrite, sync::mpsc};
use tracing::{debug, instrument, warn};

/// Writes queued responses to the browser, one frame each.
pub struct ResponseWriter {
    response_rx: mpsc::Receiver<HostResponse>,
}

impl ResponseWriter {
    /// Create a writer draining `response_rx`.
    pub fn new(response_rx: mpsc::Receiver<HostResponse>) -> Self {
        Self { response_rx }
    }

    /// Write until every response sender is dropped.
    #[instrument(skip(self, writer))]
    pub async fn run<W>(mut self, mut writer: W) -> AppResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(response) = self.response_rx.recv().await {
            let payload = encode(&response)?;
            native_messaging::write_frame(&mut writer, &payload).await?;
            debug!(request_id = ?response.request_id, bytes = payload.len(), "Response written");
        }

        Ok(())
    }
}

/// Serialize a response, swapping in an error reply when it is too large
/// for the browser to accept.
#[track_caller]
pub(crate) fn encode(response: &HostResponse) -> AppResult<Vec<u8>> {
    let payload = to_json(response)?;
    if payload.len() <= native_messaging::MAX_OUTBOUND_FRAME {
        return Ok(payload);
    }

    warn!(
        request_id = ?response.request_id,
        bytes = payload.len(),
        "Response too large for the browser, sending error instead"
    );

    let fallback = HostResponse {
        badge: response.badge.clone(),
        ..HostResponse::failure(
            response.request_id.clone(),
            "Response exceeds the 1 MiB message limit; clear completed meetings",
        )
    };
    to_json(&fallback)
}

#[track_caller]
fn to_json(response: &HostResponse) -> AppResult<Vec<u8>> {
    serde_json::to_vec(response).map_err(|e| AppError::Protocol {
        reason: format!("Failed to encode response: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
