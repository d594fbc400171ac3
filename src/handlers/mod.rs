pub mod common;
pub mod inventory;
pub mod uploads;
