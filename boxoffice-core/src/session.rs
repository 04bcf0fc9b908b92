use boxoffice_shared::SeatSnapshot;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::seat::Seat;

/// What `add_seat` does when a seat id is already present
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSeatPolicy {
    /// Refuse the new seat with `SessionError::DuplicateSeatId`.
    #[default]
    Reject,
    /// Replace the existing seat, keeping its listing position.
    Overwrite,
}

/// A scheduled showing and its seats.
///
/// Seats are listed in insertion order. Nothing is ever removed, so the
/// positions stored in `index` stay valid.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    starts_at: DateTime<Utc>,
    duplicate_policy: DuplicateSeatPolicy,
    seats: Vec<Seat>,
    index: HashMap<String, usize>,
}

impl Session {
    pub fn new(id: impl Into<String>, starts_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            starts_at,
            duplicate_policy: DuplicateSeatPolicy::default(),
            seats: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateSeatPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Add a seat keyed by its id
    pub fn add_seat(&mut self, seat: Seat) -> Result<(), SessionError> {
        match self.index.get(seat.id()).copied() {
            Some(position) => match self.duplicate_policy {
                DuplicateSeatPolicy::Reject => {
                    Err(SessionError::DuplicateSeatId(seat.id().to_string()))
                }
                DuplicateSeatPolicy::Overwrite => {
                    tracing::debug!("Seat {} overwritten in session {}", seat.id(), self.id);
                    if let Some(slot) = self.seats.get_mut(position) {
                        *slot = seat;
                    }
                    Ok(())
                }
            },
            None => {
                self.index.insert(seat.id().to_string(), self.seats.len());
                self.seats.push(seat);
                Ok(())
            }
        }
    }

    pub fn get_seat(&self, seat_id: &str) -> Option<&Seat> {
        let position = *self.index.get(seat_id)?;
        self.seats.get(position)
    }

    pub(crate) fn get_seat_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
        let position = *self.index.get(seat_id)?;
        self.seats.get_mut(position)
    }

    /// All seats in listing order
    pub fn list_seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn snapshot(&self) -> Vec<SeatSnapshot> {
        self.seats.iter().map(Seat::snapshot).collect()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn header(&self) -> String {
        format!(
            "Session {} ({})",
            self.id,
            self.starts_at.format("%Y-%m-%d %H:%M")
        )
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())?;
        for seat in &self.seats {
            write!(f, "\n{}", seat)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Duplicate seat id: {0}")]
    DuplicateSeatId(String),
}
