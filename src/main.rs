use std::{
    cell::RefCell,
    env,
    io::{self, BufReader},
    rc::Rc,
    sync::mpsc,
};

use pomodoro_state::{
    error::AppError,
    models::config::Config,
    services::{events, notify, output},
    AppContext,
};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_options(env::args().collect())?;
    if config.help {
        println!("{}", config.help_text());
        return Ok(());
    }

    info!("Started. settings: {:?}", config.settings);
    let ctx = AppContext::with_settings(config.settings);

    let stdout = Rc::new(RefCell::new(io::stdout()));
    let mut subscriptions = output::attach(&ctx, stdout);
    if config.notify {
        subscriptions.push(notify::attach(&ctx));
    }

    let (tx, rx) = mpsc::channel();
    events::process_signals(tx.clone()).map_err(AppError::Signals)?;
    // detached: a blocked stdin read must not keep the process alive
    let _reader = events::spawn_input_reader(BufReader::new(io::stdin()), tx);

    events::run(&ctx, rx);

    drop(subscriptions);
    Ok(())
}
