use notify_rust::Notification;
use tracing::{debug, warn};

use crate::{context::AppContext, store::Subscription};

pub fn send_notification(summary: &str, body: &str) {
    if let Err(e) = Notification::new().summary(summary).body(body).show() {
        warn!("unable to send notification. err == {e}");
    }
}

/// Calls `on_cancel` each time the cancel flag goes from `false` to `true`.
pub fn on_cancel_raised<F>(ctx: &AppContext, mut on_cancel: F) -> Subscription
where
    F: FnMut() + 'static,
{
    let mut previous = None;
    ctx.global_cancel.subscribe(move |cancelled: &bool| {
        if *cancelled && previous == Some(false) {
            debug!("cancel raised");
            on_cancel();
        }
        previous = Some(*cancelled);
    })
}

/// Desktop notification whenever a cancel is raised.
pub fn attach(ctx: &AppContext) -> Subscription {
    on_cancel_raised(ctx, || send_notification("Pomodoro", "Timer cancelled"))
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    fn counter(ctx: &AppContext) -> (Rc<Cell<u32>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let sub = {
            let count = Rc::clone(&count);
            on_cancel_raised(ctx, move || count.set(count.get() + 1))
        };
        (count, sub)
    }

    #[test]
    fn test_fires_on_rising_edge_only() {
        let ctx = AppContext::new();
        let (count, _sub) = counter(&ctx);

        ctx.global_cancel.set(true);
        ctx.global_cancel.set(true);
        ctx.global_cancel.set(false);
        ctx.global_cancel.set(true);

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_not_fired_for_initial_value() {
        let ctx = AppContext::new();
        ctx.global_cancel.set(true);
        let (count, _sub) = counter(&ctx);

        assert_eq!(count.get(), 0);
    }
}
