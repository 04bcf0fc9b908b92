pub mod seat;
pub mod session;
pub mod command;
pub mod outcome;
pub mod observer;
pub mod processor;

pub use boxoffice_shared::{SeatSnapshot, SeatStatus, User};
pub use command::BookingCommand;
pub use observer::{NullObserver, SessionObserver, TracingObserver};
pub use outcome::{CommandOutcome, Phase};
pub use processor::{BookingProcessor, BookingRecord, UndoMode};
pub use seat::{Seat, SeatState};
pub use session::{DuplicateSeatPolicy, Session, SessionError};

/// Reasons a booking command can be refused.
///
/// None of these are fatal: the processor turns them into failed outcomes
/// and keeps accepting commands.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingError {
    #[error("Seat {seat_id} not found")]
    SeatNotFound { seat_id: String },
    #[error("Cannot {command} seat {seat_id} while it is {status}")]
    InvalidTransition {
        command: BookingCommand,
        seat_id: String,
        status: SeatStatus,
    },
    #[error("No booking commands to undo")]
    EmptyHistory,
}

pub type BookingResult<T> = Result<T, BookingError>;
