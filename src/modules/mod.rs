pub mod auth;
pub mod booking;
pub mod event;
pub mod user;
