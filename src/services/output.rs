use std::{cell::RefCell, io::Write, rc::Rc};

use serde::Serialize;
use tracing::error;

use crate::{
    context::AppContext,
    models::settings::TimerSettings,
    store::Subscription,
    utils::consts::{CANCELLED_TEXT, HOUR, MINUTE},
};

#[derive(Serialize)]
struct SettingsLine<'a> {
    text: String,
    settings: &'a TimerSettings,
}

#[derive(Serialize)]
struct CancelLine {
    text: &'static str,
    cancelled: bool,
}

pub fn format_time(time: u32) -> String {
    let hour = time / HOUR;
    let minute = (time % HOUR) / MINUTE;
    let second = time % MINUTE;

    if hour > 0 {
        return format!("{:02}:{:02}:{:02}", hour, minute, second);
    }

    format!("{:02}:{:02}", minute, second)
}

pub fn render_settings(settings: &TimerSettings) -> serde_json::Result<String> {
    let text = format!(
        "{} / {}",
        format_time(settings.productivity),
        format_time(settings.break_time)
    );
    serde_json::to_string(&SettingsLine { text, settings })
}

pub fn render_cancel(cancelled: bool) -> serde_json::Result<String> {
    serde_json::to_string(&CancelLine {
        text: if cancelled { CANCELLED_TEXT } else { "" },
        cancelled,
    })
}

fn emit<W: Write>(out: &RefCell<W>, line: serde_json::Result<String>) {
    let line = match line {
        Ok(line) => line,
        Err(e) => {
            error!("unable to render state. err == {e}");
            return;
        }
    };

    let mut out = out.borrow_mut();
    if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
        error!("unable to write state. err == {e}");
    }
}

/// Subscribes to both cells and writes one JSON line per observed value.
pub fn attach<W: Write + 'static>(ctx: &AppContext, out: Rc<RefCell<W>>) -> Vec<Subscription> {
    let settings = {
        let out = Rc::clone(&out);
        ctx.timer_settings
            .subscribe(move |settings: &TimerSettings| emit(&out, render_settings(settings)))
    };
    let cancel = ctx
        .global_cancel
        .subscribe(move |cancelled: &bool| emit(&out, render_cancel(*cancelled)));

    vec![settings, cancel]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn lines(out: &Rc<RefCell<Vec<u8>>>) -> Vec<String> {
        String::from_utf8(out.borrow().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[rstest]
    #[case(300, "05:00")]
    #[case(1, "00:01")]
    #[case(1500, "25:00")]
    #[case(3600, "01:00:00")]
    #[case(3725, "01:02:05")]
    fn test_format_time(#[case] secs: u32, #[case] expected: &str) {
        assert_eq!(format_time(secs), expected);
    }

    #[test]
    fn test_render_settings() {
        let line = render_settings(&TimerSettings::default()).unwrap();
        assert_eq!(
            line,
            r#"{"text":"25:00 / 05:00","settings":{"productivity":1500,"break":300}}"#
        );
    }

    #[test]
    fn test_render_cancel() {
        assert_eq!(
            render_cancel(true).unwrap(),
            r#"{"text":"cancelled","cancelled":true}"#
        );
        assert_eq!(
            render_cancel(false).unwrap(),
            r#"{"text":"","cancelled":false}"#
        );
    }

    #[test]
    fn test_attach_writes_initial_and_changed_values() {
        let ctx = AppContext::new();
        let out = Rc::new(RefCell::new(Vec::new()));
        let _subs = attach(&ctx, Rc::clone(&out));

        ctx.timer_settings.set(TimerSettings::new(10, 2));
        ctx.global_cancel.set(true);

        assert_eq!(
            lines(&out),
            vec![
                r#"{"text":"25:00 / 05:00","settings":{"productivity":1500,"break":300}}"#,
                r#"{"text":"","cancelled":false}"#,
                r#"{"text":"00:10 / 00:02","settings":{"productivity":10,"break":2}}"#,
                r#"{"text":"cancelled","cancelled":true}"#,
            ]
        );
    }

    #[test]
    fn test_dropping_subscriptions_stops_output() {
        let ctx = AppContext::new();
        let out = Rc::new(RefCell::new(Vec::new()));
        drop(attach(&ctx, Rc::clone(&out)));

        ctx.global_cancel.set(true);

        assert_eq!(lines(&out).len(), 2);
    }
}
