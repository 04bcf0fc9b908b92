use boxoffice_shared::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::command::BookingCommand;
use crate::observer::{NullObserver, SessionObserver};
use crate::outcome::CommandOutcome;
use crate::seat::{Seat, SeatState};
use crate::session::Session;
use crate::{BookingError, BookingResult};

/// How `undo_last` treats the seat it pops
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UndoMode {
    /// Pop and narrate only; seat state is left as it is.
    #[default]
    ReportOnly,
    /// Pop and put the seat back into the state captured before the command.
    Restore,
}

/// A successfully executed command, kept for undo
#[derive(Debug, Clone, Serialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub command: BookingCommand,
    pub seat_id: String,
    pub user: User,
    pub prior: SeatState,
    pub executed_at: DateTime<Utc>,
}

/// Runs booking commands against a session and keeps an undo history.
///
/// Failed commands never enter the history. Nothing here is fatal: a refused
/// command comes back as a failed `CommandOutcome` and the processor keeps
/// accepting work.
pub struct BookingProcessor<O: SessionObserver = NullObserver> {
    history: Vec<BookingRecord>,
    undo_mode: UndoMode,
    observer: O,
}

impl BookingProcessor {
    pub fn new() -> Self {
        Self::with_observer(NullObserver)
    }
}

impl Default for BookingProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SessionObserver> BookingProcessor<O> {
    pub fn with_observer(observer: O) -> Self {
        Self {
            history: Vec::new(),
            undo_mode: UndoMode::default(),
            observer,
        }
    }

    pub fn with_undo_mode(mut self, undo_mode: UndoMode) -> Self {
        self.undo_mode = undo_mode;
        self
    }

    /// Execute `command` and record it when it succeeds.
    pub fn execute_command(
        &mut self,
        command: BookingCommand,
        session: &mut Session,
        seat_id: &str,
        user: &User,
    ) -> CommandOutcome {
        let prior = session.get_seat(seat_id).map(Seat::state);
        let outcome = command.execute(session, seat_id, user);
        self.observer.on_outcome(&outcome);

        if let (true, Some(prior)) = (outcome.success, prior) {
            let record = BookingRecord {
                id: Uuid::new_v4(),
                command,
                seat_id: seat_id.to_string(),
                user: user.clone(),
                prior,
                executed_at: Utc::now(),
            };
            debug!("Recorded {} {} for seat {}", command, record.id, seat_id);
            self.history.push(record);
            self.observer.on_listing(session);
        }

        outcome
    }

    /// Pop the most recent successful command and undo it.
    ///
    /// Returns `BookingError::EmptyHistory` when there is nothing to pop; the
    /// session is not touched in that case.
    pub fn undo_last(&mut self, session: &mut Session) -> BookingResult<CommandOutcome> {
        let Some(record) = self.history.pop() else {
            debug!("Undo requested with empty history");
            return Err(BookingError::EmptyHistory);
        };

        info!(
            "Undoing {} of seat {} by {} ({:?})",
            record.command, record.seat_id, record.user.id, self.undo_mode
        );

        let prior = match self.undo_mode {
            UndoMode::Restore => Some(&record.prior),
            UndoMode::ReportOnly => None,
        };
        let outcome = record
            .command
            .undo(session, &record.seat_id, &record.user, prior);

        self.observer.on_outcome(&outcome);
        self.observer.on_listing(session);
        Ok(outcome)
    }

    /// Executed commands, oldest first
    pub fn history(&self) -> &[BookingRecord] {
        &self.history
    }

    pub fn last_record(&self) -> Option<&BookingRecord> {
        self.history.last()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}
