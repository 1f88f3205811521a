use crate::HostMessage;

use uuid::Uuid;

/// Commands sent from the frame reader to the main application.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// A decoded message from the extension.
    Handle {
        /// Host-assigned id for logs.
        request_id: Uuid,
        /// The extension's `requestId`, echoed in the reply.
        reply_to: Option<String>,
        /// The message.
        message: HostMessage,
    },
    /// A frame that could not be decoded.
    Malformed {
        /// Host-assigned id for logs.
        request_id: Uuid,
        /// The extension's `requestId`, if it could still be read.
        reply_to: Option<String>,
        /// Decoder error.
        reason: String,
    },
    /// Request application shutdown.
    Shutdown,
}
