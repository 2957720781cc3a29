//! Shared reactive state for a pomodoro-style timer UI.
//!
//! [`AppContext`] holds two observable cells: the productivity/break
//! [`TimerSettings`] and the global cancel flag. Consumers subscribe to them
//! and write to them through [`Writable`].

pub mod context;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use context::AppContext;
pub use models::settings::TimerSettings;
pub use store::{Subscription, Writable};
