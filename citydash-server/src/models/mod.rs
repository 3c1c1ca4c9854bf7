//! Wire types shared by the REST and WebSocket handlers

mod controls;
mod messages;

pub use controls::*;
pub use messages::*;
