pub mod ports;
pub mod event_bus;
pub mod normalize;
pub mod api;
pub mod session;
pub mod goals;
pub mod chat;
pub mod achievements;
