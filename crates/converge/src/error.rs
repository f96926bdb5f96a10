//! Configuration errors, raised before any remote call

use thiserror::Error;

/// Invalid value for an enumerated option.
///
/// Raised by the `FromStr` impls of [`crate::Intent`] and
/// [`crate::SourceType`]; nothing has touched the server when this fires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for {option}: must be one of {allowed}")]
pub struct InvalidValue {
    option: &'static str,
    value: String,
    allowed: String,
}

impl InvalidValue {
    pub(crate) fn new(option: &'static str, value: &str, allowed: &[&str]) -> Self {
        Self {
            option,
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }

    /// The option the value was supplied for
    pub fn option(&self) -> &'static str {
        self.option
    }
}
