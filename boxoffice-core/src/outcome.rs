use boxoffice_shared::{SeatSnapshot, User};
use serde::Serialize;
use std::fmt;

use crate::command::BookingCommand;
use crate::BookingError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Execute,
    Undo,
}

/// Result of running or undoing one booking command.
///
/// `seat` is the seat as it looks after the attempt, or `None` when the seat
/// does not exist.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommandOutcome {
    pub phase: Phase,
    pub command: BookingCommand,
    pub seat_id: String,
    pub user_id: String,
    pub success: bool,
    pub message: String,
    pub seat: Option<SeatSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BookingError>,
}

impl CommandOutcome {
    pub(crate) fn succeeded(
        phase: Phase,
        command: BookingCommand,
        seat_id: &str,
        user: &User,
        message: String,
        seat: SeatSnapshot,
    ) -> Self {
        Self {
            phase,
            command,
            seat_id: seat_id.to_string(),
            user_id: user.id.clone(),
            success: true,
            message,
            seat: Some(seat),
            error: None,
        }
    }

    pub(crate) fn failed(
        phase: Phase,
        command: BookingCommand,
        seat_id: &str,
        user: &User,
        message: String,
        error: BookingError,
        seat: Option<SeatSnapshot>,
    ) -> Self {
        Self {
            phase,
            command,
            seat_id: seat_id.to_string(),
            user_id: user.id.clone(),
            success: false,
            message,
            seat,
            error: Some(error),
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
