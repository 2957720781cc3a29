use crate::{models::settings::TimerSettings, store::Writable};

/// Shared state of the running application.
///
/// Built once at startup and handed to whatever needs it. Clones share the
/// same cells.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub timer_settings: Writable<TimerSettings>,
    /// `true` while a cancel is pending. Consumers reset it.
    pub global_cancel: Writable<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: TimerSettings) -> Self {
        Self {
            timer_settings: Writable::new(settings),
            global_cancel: Writable::new(false),
        }
    }
}
