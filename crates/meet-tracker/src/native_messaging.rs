//! Browser native-messaging framing.
//!
//! Every message is a 32-bit length in native byte order followed by that
//! many bytes of UTF-8 JSON.

use crate::{AppError, AppResult};

use std::{io::ErrorKind, panic::Location};

use error_location::ErrorLocation;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest frame the browser accepts from a host.
pub(crate) const MAX_OUTBOUND_FRAME: usize = 1024 * 1024;

/// Largest frame this host will buffer from the browser.
pub(crate) const MAX_INBOUND_FRAME: usize = 64 * 1024 * 1024;

/// Read one frame. Returns `None` when the browser closed the pipe.
pub(crate) async fn read_frame<R>(reader: &mut R) -> AppResult<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 4];
    match reader.read_exact(&mut header).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_ne_bytes(header) as usize;
    if len > MAX_INBOUND_FRAME {
        return Err(AppError::Protocol {
            reason: format!("Inbound frame of {} bytes exceeds {}", len, MAX_INBOUND_FRAME),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;

    Ok(Some(payload))
}

/// Write one frame and flush it.
pub(crate) async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_OUTBOUND_FRAME {
        return Err(AppError::Protocol {
            reason: format!(
                "Outbound frame of {} bytes exceeds {}",
                payload.len(),
                MAX_OUTBOUND_FRAME
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let len = u32::try_from(payload.len()).map_err(|e| AppError::Protocol {
        reason: format!("Frame length does not fit in u32: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    writer.write_all(&len.to_ne_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;

    Ok(())
}
