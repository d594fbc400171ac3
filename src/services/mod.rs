pub mod inventory;
pub mod uploads;
