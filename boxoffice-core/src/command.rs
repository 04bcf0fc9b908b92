use boxoffice_shared::{SeatSnapshot, SeatStatus, User};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::outcome::{CommandOutcome, Phase};
use crate::seat::{Seat, SeatState};
use crate::session::Session;
use crate::{BookingError, BookingResult};

/// A single seat transition with its own guard.
///
/// | Variant  | Requires                         | Result                      |
/// |----------|----------------------------------|-----------------------------|
/// | Reserve  | Free                             | Reserved, holder = user     |
/// | Cancel   | Reserved and held by the user    | Free, holder cleared        |
/// | Purchase | Reserved and held by the user    | Sold, holder kept           |
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingCommand {
    Reserve,
    Cancel,
    Purchase,
}

impl BookingCommand {
    pub const ALL: [BookingCommand; 3] = [
        BookingCommand::Reserve,
        BookingCommand::Cancel,
        BookingCommand::Purchase,
    ];

    /// Apply the transition to `seat_id` on behalf of `user`.
    ///
    /// A refused command leaves the session untouched and reports why in
    /// the outcome.
    pub fn execute(&self, session: &mut Session, seat_id: &str, user: &User) -> CommandOutcome {
        match self.apply(session, seat_id, user) {
            Ok(seat) => {
                debug!("{} {} seat {}: now {}", user.id, self, seat_id, seat.status);
                CommandOutcome::succeeded(
                    Phase::Execute,
                    *self,
                    seat_id,
                    user,
                    self.success_message(user, seat_id),
                    seat,
                )
            }
            Err(err) => {
                info!("Rejected {} of seat {} for {}: {}", self, seat_id, user.id, err);
                let seat = session.get_seat(seat_id).map(Seat::snapshot);
                CommandOutcome::failed(
                    Phase::Execute,
                    *self,
                    seat_id,
                    user,
                    self.failure_message(&err, seat_id),
                    err,
                    seat,
                )
            }
        }
    }

    /// Reverse a previously executed command.
    ///
    /// With `prior` the seat is put back into the captured state. Without it
    /// the undo is only narrated and the seat keeps its current state.
    pub(crate) fn undo(
        &self,
        session: &mut Session,
        seat_id: &str,
        user: &User,
        prior: Option<&SeatState>,
    ) -> CommandOutcome {
        let Some(seat) = session.get_seat_mut(seat_id) else {
            let err = BookingError::SeatNotFound {
                seat_id: seat_id.to_string(),
            };
            let message = err.to_string();
            return CommandOutcome::failed(Phase::Undo, *self, seat_id, user, message, err, None);
        };

        if let Some(prior) = prior {
            if seat.restore(prior.clone()) {
                debug!("Seat {} restored to {}", seat_id, seat.status());
            } else {
                warn!("Refused inconsistent state for seat {}: {:?}", seat_id, prior);
            }
        }

        CommandOutcome::succeeded(
            Phase::Undo,
            *self,
            seat_id,
            user,
            self.undo_label().to_string(),
            seat.snapshot(),
        )
    }

    /// Whether the guard allows this transition right now.
    pub fn permits(&self, seat: &Seat, user: &User) -> bool {
        match self {
            BookingCommand::Reserve => seat.status() == SeatStatus::Free,
            BookingCommand::Cancel | BookingCommand::Purchase => {
                seat.status() == SeatStatus::Reserved && seat.is_held_by(user)
            }
        }
    }

    pub fn undo_label(&self) -> &'static str {
        match self {
            BookingCommand::Reserve => "Reservation undone",
            BookingCommand::Cancel => "Cancellation undone",
            BookingCommand::Purchase => "Purchase undone",
        }
    }

    fn apply(&self, session: &mut Session, seat_id: &str, user: &User) -> BookingResult<SeatSnapshot> {
        let seat = session
            .get_seat_mut(seat_id)
            .ok_or_else(|| BookingError::SeatNotFound {
                seat_id: seat_id.to_string(),
            })?;

        if !self.permits(seat, user) {
            return Err(BookingError::InvalidTransition {
                command: *self,
                seat_id: seat_id.to_string(),
                status: seat.status(),
            });
        }

        match self {
            BookingCommand::Reserve => seat.reserve(user.clone()),
            BookingCommand::Cancel => seat.release(),
            BookingCommand::Purchase => seat.mark_sold(),
        }

        Ok(seat.snapshot())
    }

    fn success_message(&self, user: &User, seat_id: &str) -> String {
        match self {
            BookingCommand::Reserve => format!("{} reserved seat {}", user.name, seat_id),
            BookingCommand::Cancel => {
                format!("{} cancelled the reservation for seat {}", user.name, seat_id)
            }
            BookingCommand::Purchase => {
                format!("{} purchased a ticket for seat {}", user.name, seat_id)
            }
        }
    }

    fn failure_message(&self, err: &BookingError, seat_id: &str) -> String {
        match (self, err) {
            (BookingCommand::Reserve, BookingError::InvalidTransition { .. }) => {
                format!("Seat {} is occupied", seat_id)
            }
            (BookingCommand::Cancel, BookingError::InvalidTransition { .. }) => {
                format!("Cannot cancel the reservation for seat {}", seat_id)
            }
            (BookingCommand::Purchase, BookingError::InvalidTransition { .. }) => {
                format!("Cannot purchase seat {}", seat_id)
            }
            _ => err.to_string(),
        }
    }
}

impl fmt::Display for BookingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingCommand::Reserve => "reserve",
            BookingCommand::Cancel => "cancel",
            BookingCommand::Purchase => "purchase",
        };
        f.write_str(label)
    }
}
