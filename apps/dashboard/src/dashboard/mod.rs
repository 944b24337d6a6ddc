// Dashboard state machine: per-session selection, rendering, skill growth.

pub mod handlers;
pub mod render;
pub mod session;
pub mod skills;
