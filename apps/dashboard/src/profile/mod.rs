// Profile data: document loading, the experience store, static assets.

pub mod assets;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod store;
