//! HTTP handlers.

pub mod callback;
pub mod health;

pub use callback::callback;
pub use health::health;
