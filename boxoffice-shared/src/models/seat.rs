use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::User;

/// Seat lifecycle: Free -> Reserved -> Sold, plus Reserved -> Free on cancel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    #[default]
    Free,
    Reserved,
    Sold,
}

impl SeatStatus {
    /// Whether a seat in this status must have a holder.
    pub fn is_held(&self) -> bool {
        matches!(self, SeatStatus::Reserved | SeatStatus::Sold)
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeatStatus::Free => "free",
            SeatStatus::Reserved => "reserved",
            SeatStatus::Sold => "sold",
        };
        f.write_str(label)
    }
}

/// Read-only view of a seat, used in outcomes and reports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub seat_id: String,
    pub row: u32,
    pub number: u32,
    pub status: SeatStatus,
    pub holder: Option<User>,
}

impl fmt::Display for SeatSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}, Seat {}: {}", self.row, self.number, self.status)?;
        if let Some(holder) = &self.holder {
            write!(f, " ({})", holder)?;
        }
        Ok(())
    }
}
