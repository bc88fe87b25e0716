//! String-keyed engine configuration.
//!
//! Engines recognize a fixed set of option names; unrecognized keys are
//! ignored so one option map can be shared across algorithms. A recognized
//! key with an unparsable or out-of-domain value is rejected before any
//! computation starts.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

pub type Options = FxHashMap<String, String>;

pub(crate) fn parse_usize(options: &Options, key: &str) -> Result<Option<usize>> {
    let Some(raw) = options.get(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<usize>()
        .map(Some)
        .map_err(|err| Error::InvalidOption {
            key: key.to_string(),
            message: err.to_string(),
        })
}

pub(crate) fn parse_positive_f64(options: &Options, key: &str) -> Result<Option<f64>> {
    let Some(raw) = options.get(key) else {
        return Ok(None);
    };
    let value: f64 = raw.trim().parse().map_err(|err| Error::InvalidOption {
        key: key.to_string(),
        message: format!("{err}"),
    })?;
    if !(value > 0.0) {
        return Err(Error::InvalidOption {
            key: key.to_string(),
            message: format!("expected a positive number, got {value}"),
        });
    }
    Ok(Some(value))
}

pub(crate) fn parse_bool(options: &Options, key: &str) -> Result<Option<bool>> {
    match options.get(key).map(|raw| raw.trim()) {
        None => Ok(None),
        Some("true" | "1" | "yes" | "on") => Ok(Some(true)),
        Some("false" | "0" | "no" | "off") => Ok(Some(false)),
        Some(other) => Err(Error::InvalidOption {
            key: key.to_string(),
            message: format!("expected a boolean, got `{other}`"),
        }),
    }
}
