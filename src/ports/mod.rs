//! Port traits: the seams between chart logic and the outside world.

pub mod config_port;
pub mod history_port;
pub mod store_port;
