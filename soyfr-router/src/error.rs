use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to lock route state: poisoned"))]
    LockPoisoned,

    #[snafu(display("Invalid route pattern '{pattern}': {reason}"))]
    InvalidPattern { pattern: String, reason: String },

    #[snafu(display("Failed to read config {}: {source}", path.display()))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to parse config: {source}"))]
    ConfigParse { source: toml::de::Error },

    #[snafu(display("Invalid duration '{value}', expected e.g. \"0.2s\" or \"200ms\""))]
    InvalidDuration { value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
