/// API route modules
pub mod catalog;
pub mod health;
pub mod storage;
pub mod tracks;
pub mod uploads;
pub mod users;
