use thiserror::Error;
use tracing::warn;

use crate::{
    models::settings::TimerSettings,
    utils::consts::{BREAK_TIME, MINUTE, PRODUCTIVITY_TIME},
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} specified but no value was provided")]
    MissingValue(String),
}

#[derive(Debug, Default, PartialEq)]
pub struct Config {
    pub settings: TimerSettings,
    pub notify: bool,
    pub help: bool,
    pub binary_name: String,
}

impl Config {
    pub fn from_options(options: Vec<String>) -> Result<Self, ConfigError> {
        let mut settings = TimerSettings::default();
        let mut notify = false;
        let mut help = false;

        let binary_name = options
            .first()
            .and_then(|path| path.split('/').next_back())
            .unwrap_or_default()
            .to_string();

        for opt in options.iter() {
            match opt.as_str() {
                "-p" | "--productivity" => {
                    if let Some(secs) = parse_minutes(&options, opt)? {
                        settings.productivity = secs;
                    }
                }
                "-b" | "--break" => {
                    if let Some(secs) = parse_minutes(&options, opt)? {
                        settings.break_time = secs;
                    }
                }
                "--notify" => notify = true,
                "-h" | "--help" => help = true,
                _ => (),
            }
        }

        Ok(Self {
            settings,
            notify,
            help,
            binary_name,
        })
    }

    pub fn help_text(&self) -> String {
        let binary_name = if self.binary_name.is_empty() {
            env!("CARGO_PKG_NAME")
        } else {
            self.binary_name.as_str()
        };

        format!(
            r#"usage: {} [options]
    options:
        -h, --help                      Prints this help message
        -p, --productivity <value>      Sets how long a productivity interval is, in minutes. default: {}
        -b, --break <value>             Sets how long a break is, in minutes. default: {}
        --notify                        Sends a desktop notification when a cancel is raised

    commands (stdin, one per line):
        [set-productivity;<minutes>]    Sets the productivity interval
        [set-break;<minutes>]           Sets the break interval
        [set-productivity-secs;<secs>]  Sets the productivity interval, in seconds
        [set-break-secs;<secs>]         Sets the break interval, in seconds
        cancel                          Raises the global cancel flag
        clear                           Clears the global cancel flag
        reset                           Restores the default intervals
        exit                            Stops

    signals:
        SIGINT                          Raises the global cancel flag
        SIGTERM                         Stops"#,
            binary_name,
            PRODUCTIVITY_TIME / MINUTE,
            BREAK_TIME / MINUTE,
        )
    }
}

/// Reads the minutes following `opt` and converts them to seconds. An
/// unparsable or zero value is reported and skipped.
fn parse_minutes(options: &[String], opt: &str) -> Result<Option<u32>, ConfigError> {
    let unparsed = get_config_value(options, &[opt])
        .ok_or_else(|| ConfigError::MissingValue(opt.to_string()))?;

    match unparsed.parse::<u32>() {
        Ok(0) => {
            warn!("{opt}: value must be higher than 0, ignoring");
            Ok(None)
        }
        Ok(val) => match val.checked_mul(MINUTE) {
            Some(secs) => Ok(Some(secs)),
            None => {
                warn!("value for {opt} is too large. val == {unparsed}");
                Ok(None)
            }
        },
        Err(_) => {
            warn!("invalid value for {opt}. val == {unparsed}");
            Ok(None)
        }
    }
}

pub fn get_config_value<'a>(options: &'a [String], keys: &[&str]) -> Option<&'a String> {
    match options.iter().position(|x| keys.contains(&x.as_str())) {
        Some(index) => options.get(index + 1),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_from_options_default() {
        let config = Config::from_options(options(&["/usr/bin/pomodoro-state_test"])).unwrap();

        assert_eq!(config.settings, TimerSettings::new(1500, 300));
        assert!(!config.notify);
        assert!(!config.help);
        assert_eq!(config.binary_name, "pomodoro-state_test");
    }

    #[test]
    fn test_config_from_options_with_custom_values() {
        let config = Config::from_options(options(&[
            "pomodoro-state",
            "-p",
            "50",
            "--break",
            "10",
            "--notify",
        ]))
        .unwrap();

        assert_eq!(config.settings, TimerSettings::new(50 * MINUTE, 10 * MINUTE));
        assert!(config.notify);
    }

    #[test]
    fn test_config_from_options_invalid_values_keep_defaults() {
        let config = Config::from_options(options(&[
            "pomodoro-state",
            "--productivity",
            "abc",
            "-b",
            "-3",
        ]))
        .unwrap();

        assert_eq!(config.settings, TimerSettings::default());
    }

    #[test]
    fn test_config_from_options_zero_keeps_defaults() {
        let config =
            Config::from_options(options(&["pomodoro-state", "-p", "0", "--break", "0"])).unwrap();

        assert_eq!(config.settings, TimerSettings::default());
    }

    #[test]
    fn test_help_text_uses_binary_name() {
        let config = Config::from_options(options(&["/opt/bin/focus-bar", "-h"])).unwrap();

        assert!(config.help_text().starts_with("usage: focus-bar [options]"));
        assert!(config.help_text().contains("in minutes. default: 25"));
    }

    #[test]
    fn test_help_text_without_binary_name() {
        let config = Config::default();

        assert!(config
            .help_text()
            .starts_with(&format!("usage: {} [options]", env!("CARGO_PKG_NAME"))));
    }

    #[test]
    fn test_config_from_options_missing_value() {
        let result = Config::from_options(options(&["pomodoro-state", "--break"]));

        assert_eq!(result, Err(ConfigError::MissingValue("--break".to_string())));
    }

    #[test]
    fn test_config_from_options_help() {
        let config = Config::from_options(options(&["pomodoro-state", "-h"])).unwrap();

        assert!(config.help);
    }

    #[test]
    fn test_config_from_options_empty() {
        let config = Config::from_options(vec![]).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_get_config_value() {
        let args = options(&["a", "-p", "5"]);

        assert_eq!(get_config_value(&args, &["-p"]), Some(&"5".to_string()));
        assert_eq!(get_config_value(&args, &["-b"]), None);
    }
}
