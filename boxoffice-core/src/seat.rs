use boxoffice_shared::{SeatSnapshot, SeatStatus, User};
use serde::Serialize;
use std::fmt;

/// The `(status, holder)` pair a seat is in at a given moment.
///
/// Captured before every successful command so the transition can be
/// reversed later. Only `Seat::state` produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatState {
    status: SeatStatus,
    holder: Option<User>,
}

impl SeatState {
    pub fn status(&self) -> SeatStatus {
        self.status
    }

    pub fn holder(&self) -> Option<&User> {
        self.holder.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn unchecked(status: SeatStatus, holder: Option<User>) -> Self {
        Self { status, holder }
    }

    /// Holder present exactly when the status is held
    fn is_consistent(&self) -> bool {
        self.holder.is_some() == self.status.is_held()
    }
}

/// A bookable seat in a session.
///
/// Holder is present exactly when the status is `Reserved` or `Sold`. Only
/// booking commands mutate a seat.
#[derive(Debug, Clone)]
pub struct Seat {
    id: String,
    row: u32,
    number: u32,
    status: SeatStatus,
    current_user: Option<User>,
}

impl Seat {
    pub fn new(id: impl Into<String>, row: u32, number: u32) -> Self {
        Self {
            id: id.into(),
            row,
            number,
            status: SeatStatus::Free,
            current_user: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn status(&self) -> SeatStatus {
        self.status
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_held_by(&self, user: &User) -> bool {
        self.current_user.as_ref() == Some(user)
    }

    pub fn state(&self) -> SeatState {
        SeatState {
            status: self.status,
            holder: self.current_user.clone(),
        }
    }

    pub fn snapshot(&self) -> SeatSnapshot {
        SeatSnapshot {
            seat_id: self.id.clone(),
            row: self.row,
            number: self.number,
            status: self.status,
            holder: self.current_user.clone(),
        }
    }

    /// Free -> Reserved
    pub(crate) fn reserve(&mut self, user: User) {
        self.status = SeatStatus::Reserved;
        self.current_user = Some(user);
    }

    /// Reserved -> Sold, holder kept
    pub(crate) fn mark_sold(&mut self) {
        self.status = SeatStatus::Sold;
    }

    /// Reserved -> Free
    pub(crate) fn release(&mut self) {
        self.status = SeatStatus::Free;
        self.current_user = None;
    }

    /// Put back a previously captured state.
    ///
    /// A state that breaks the holder invariant is refused and the seat is
    /// left as it is; returns whether the state was applied.
    pub(crate) fn restore(&mut self, state: SeatState) -> bool {
        if !state.is_consistent() {
            return false;
        }
        self.status = state.status;
        self.current_user = state.holder;
        true
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
