use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MessageError {
    #[error("message name is missing. msg == {0:?}")]
    MissingName(String),
    #[error("unable to decode message: {0}")]
    Malformed(String),
    #[error("invalid value for {name}. cause: {cause}")]
    InvalidValue {
        name: String,
        cause: std::num::ParseIntError,
    },
}

/// A named integer command, encoded as `[name;value]`.
#[derive(Debug, PartialEq)]
pub struct Message {
    name: String,
    value: i64,
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(.*?);(.*?)\]").expect("valid message pattern"))
}

impl Message {
    pub fn new(name: &str, value: i64) -> Self {
        Self {
            name: String::from(name),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn decode(input: &str) -> Result<Self, MessageError> {
        let caps = pattern()
            .captures(input)
            .ok_or_else(|| MessageError::Malformed(input.to_string()))?;
        let (whole, [name, value]) = caps.extract();

        if name.is_empty() {
            return Err(MessageError::MissingName(whole.to_string()));
        }

        let value = value
            .trim()
            .parse()
            .map_err(|cause| MessageError::InvalidValue {
                name: name.to_string(),
                cause,
            })?;

        Ok(Self::new(name, value))
    }

    pub fn encode(&self) -> String {
        format!("[{};{}]", self.name, self.value)
    }
}
