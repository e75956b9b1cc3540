pub mod auth;
pub mod chat;
pub mod goals;
pub mod milestone;
pub mod profile;
