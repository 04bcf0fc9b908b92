pub mod seat;
pub mod user;
