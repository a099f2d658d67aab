use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The extension points a hook can be registered for.
///
/// The set is closed: events are known when the crate is built and can not be
/// added at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Fired once the response is fully constructed, the dispatched value is the response
    Response,
}

impl HookEvent {
    pub const ALL: [HookEvent; 1] = [HookEvent::Response];

    pub const fn name(self) -> &'static str {
        match self {
            HookEvent::Response => "response",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown hook event: {name}")]
pub struct ParseEventError {
    name: String,
}

impl FromStr for HookEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookEvent::ALL.into_iter().find(|event| event.name() == s).ok_or_else(|| ParseEventError { name: s.to_string() })
    }
}
