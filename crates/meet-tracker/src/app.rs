use crate::{AppCommand, AppResult, HostMessage, HostResponse};

use meet_tracker_core::{
    BadgeStyle, HistoryView, KeyValueStore, MeetingLedger, MeetingRecord, derive_badge,
};

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Main application state.
///
/// Sole owner of the ledger: every command from the frame reader is handled
/// here, one at a time, and answered through `response_tx`.
pub struct App<S> {
    pub(crate) ledger: MeetingLedger<S>,
    pub(crate) badge_style: BadgeStyle,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) response_tx: mpsc::Sender<HostResponse>,
}

impl<S: KeyValueStore> App<S> {
    /// Run the main application event loop.
    ///
    /// Publishes the badge for the stored collection first, so a restarted
    /// browser shows the right count before any message arrives.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Meet-Tracker host starting");

        let meetings = self.ledger.meetings().await;
        self.respond(HostResponse {
            badge: Some(derive_badge(&meetings, &self.badge_style)),
            ..HostResponse::default()
        })
        .await;

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::Handle { request_id, reply_to, message } => {
                            let response = self.handle(request_id, reply_to, message).await;
                            self.respond(response).await;
                        }
                        AppCommand::Malformed { request_id, reply_to, reason } => {
                            warn!(request_id = %request_id, reason = %reason, "Rejecting malformed message");
                            self.respond(HostResponse::failure(
                                reply_to,
                                format!("Malformed message: {}", reason),
                            ))
                            .await;
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("Command channel closed, shutting down");
                    break;
                }
            }
        }

        info!("Meet-Tracker host stopped");

        Ok(())
    }

    /// Apply one message to the ledger and build its reply.
    ///
    /// Ledger failures become error replies; the loop keeps running.
    #[instrument(skip(self, reply_to, message), fields(action = message.action()))]
    pub(crate) async fn handle(
        &self,
        request_id: Uuid,
        reply_to: Option<String>,
        message: HostMessage,
    ) -> HostResponse {
        let result = match message {
            HostMessage::SaveMeeting { meeting } => self.ledger.reconcile(meeting).await,
            HostMessage::UpdateTitle {
                meeting_id,
                new_title,
            } => self.ledger.update_title(&meeting_id, &new_title).await,
            HostMessage::DeleteMeeting { meeting_id } => self.ledger.delete_one(&meeting_id).await,
            HostMessage::ClearCompleted => self.ledger.clear_completed().await,
            HostMessage::GetMeetings => Ok(self.ledger.meetings().await),
            HostMessage::GetHistory => {
                let meetings = self.ledger.meetings().await;
                return HostResponse {
                    history: Some(HistoryView::from_meetings(&meetings, &Local)),
                    ..self.reply(reply_to, meetings)
                };
            }
        };

        match result {
            Ok(meetings) => self.reply(reply_to, meetings),
            Err(e) => {
                error!(request_id = %request_id, error = ?e, "Ledger operation failed");
                let meetings = self.ledger.meetings().await;
                HostResponse {
                    badge: Some(derive_badge(&meetings, &self.badge_style)),
                    ..HostResponse::failure(reply_to, e.to_string())
                }
            }
        }
    }

    fn reply(&self, reply_to: Option<String>, meetings: Vec<MeetingRecord>) -> HostResponse {
        HostResponse {
            request_id: reply_to,
            badge: Some(derive_badge(&meetings, &self.badge_style)),
            meetings: Some(meetings),
            ..HostResponse::default()
        }
    }

    async fn respond(&self, response: HostResponse) {
        if let Err(e) = self.response_tx.send(response).await {
            error!(error = %e, "Response writer gone, dropping response");
        }
    }
}
