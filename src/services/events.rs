use std::{
    io::{self, BufRead},
    ops::ControlFlow,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};
use tracing::{debug, info, warn};

use crate::{
    context::AppContext,
    models::{
        message::{Message, MessageError},
        settings::TimerSettings,
    },
    utils::{consts::MINUTE, helper::trim_whitespace},
};

pub const OPERATIONS: [&str; 4] = ["cancel", "clear", "reset", "exit"];
pub const SET_OPERATIONS: [&str; 4] = [
    "set-productivity",
    "set-break",
    "set-productivity-secs",
    "set-break-secs",
];

/// Input for the UI loop. Produced on helper threads, applied on the loop's.
#[derive(Debug, PartialEq)]
pub enum Event {
    Input(String),
    Signal(i32),
    Closed,
}

enum Interval {
    Productivity,
    Break,
}

fn apply_set_operation(ctx: &AppContext, msg: &Message) {
    let value = match u32::try_from(msg.value()) {
        Ok(value) if value > 0 => value,
        _ => {
            warn!("{}: value must be higher than 0, ignoring", msg.name());
            return;
        }
    };

    let (interval, secs) = match msg.name() {
        "set-productivity" => (Interval::Productivity, value.checked_mul(MINUTE)),
        "set-break" => (Interval::Break, value.checked_mul(MINUTE)),
        "set-productivity-secs" => (Interval::Productivity, Some(value)),
        "set-break-secs" => (Interval::Break, Some(value)),
        _ => {
            warn!("invalid command, {}", msg.name());
            return;
        }
    };

    let Some(secs) = secs else {
        warn!("{}: value is too large, ignoring", msg.name());
        return;
    };

    ctx.timer_settings.update(|settings| match interval {
        Interval::Productivity => TimerSettings {
            productivity: secs,
            ..settings
        },
        Interval::Break => TimerSettings {
            break_time: secs,
            ..settings
        },
    });
}

/// Applies one line of input to the context.
pub fn process_message(ctx: &AppContext, message: &str) -> ControlFlow<()> {
    let message = trim_whitespace(message);

    match Message::decode(&message) {
        Ok(msg) => apply_set_operation(ctx, &msg),
        Err(MessageError::Malformed(_)) => match message.as_str() {
            "cancel" => ctx.global_cancel.set(true),
            "clear" => ctx.global_cancel.set(false),
            "reset" => ctx.timer_settings.set(TimerSettings::default()),
            "exit" => return ControlFlow::Break(()),
            "" => (),
            _ => warn!("Unknown message: {}", message),
        },
        Err(e) => warn!("err: {e}"),
    }

    ControlFlow::Continue(())
}

pub fn process_event(ctx: &AppContext, event: Event) -> ControlFlow<()> {
    debug!("event: {:?}", event);
    match event {
        Event::Input(line) => process_message(ctx, &line),
        Event::Signal(SIGINT) => {
            info!("interrupt received, raising cancel");
            ctx.global_cancel.set(true);
            ControlFlow::Continue(())
        }
        Event::Signal(signal) => {
            info!("signal {signal} received, exiting");
            ControlFlow::Break(())
        }
        Event::Closed => ControlFlow::Break(()),
    }
}

/// Applies events until one asks to stop or every sender is gone.
pub fn run(ctx: &AppContext, rx: Receiver<Event>) {
    for event in rx.iter() {
        if process_event(ctx, event).is_break() {
            break;
        }
    }
    info!("event loop stopped");
}

pub fn spawn_input_reader<R>(input: R, tx: Sender<Event>) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Input(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("unable to read input. err == {e}");
                    break;
                }
            }
        }
        let _ = tx.send(Event::Closed);
    })
}

// SIGINT raises the cancel flag instead of killing the process, SIGTERM stops the loop
pub fn process_signals(tx: Sender<Event>) -> io::Result<()> {
    // all possible realtime UNIX signals
    let sigrt = 34..64;

    // intentionally ignore realtime signals
    // if we don't do this, the process will terminate if the user sends SIGRTMIN+N
    let dont_handle = Signals::new(sigrt.collect::<Vec<i32>>())?;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    thread::spawn(move || {
        let _dont_handle = dont_handle;
        for signal in signals.forever() {
            if tx.send(Event::Signal(signal)).is_err() {
                break;
            }
        }
    });

    Ok(())
}
