pub mod models;

pub use models::seat::{SeatSnapshot, SeatStatus};
pub use models::user::User;
