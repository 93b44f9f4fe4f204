pub mod encoding;
pub mod error;
pub mod models;
pub mod store;
pub mod window;
