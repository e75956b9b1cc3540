pub mod user;
pub mod goal;
pub mod chat;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::NovaError;
pub type Result<T> = std::result::Result<T, NovaError>;
