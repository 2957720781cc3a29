pub mod events;
pub mod notify;
pub mod output;
