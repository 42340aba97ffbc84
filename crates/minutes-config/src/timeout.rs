use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, de};

/// Literal that opts a call out of any deadline
const UNBOUNDED: &str = "unbounded";

/// Per-call deadline for a backend request
///
/// Deserialized from a duration string (`"120s"`, `"2m"`) or the literal
/// `"unbounded"`. There is no implicit unbounded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTimeout {
    /// Give up after the given duration
    Bounded(Duration),
    /// Wait indefinitely for the backend
    Unbounded,
}

impl RequestTimeout {
    /// The deadline, if any
    pub const fn as_duration(self) -> Option<Duration> {
        match self {
            Self::Bounded(duration) => Some(duration),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for RequestTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(duration) => write!(f, "{}s", duration.as_secs_f64()),
            Self::Unbounded => f.write_str(UNBOUNDED),
        }
    }
}

impl<'de> Deserialize<'de> for RequestTimeout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();

        if raw.eq_ignore_ascii_case(UNBOUNDED) {
            return Ok(Self::Unbounded);
        }

        let duration = duration_str::parse(raw).map_err(|e| de::Error::custom(format!("invalid timeout `{raw}`: {e}")))?;

        if duration.is_zero() {
            return Err(de::Error::custom(
                "timeout must be greater than zero; use \"unbounded\" to disable it",
            ));
        }

        Ok(Self::Bounded(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        timeout: RequestTimeout,
    }

    fn parse(value: &str) -> Result<RequestTimeout, toml::de::Error> {
        toml::from_str::<Holder>(&format!("timeout = \"{value}\"")).map(|h| h.timeout)
    }

    #[test]
    fn parses_seconds() {
        assert_eq!(parse("120s").unwrap(), RequestTimeout::Bounded(Duration::from_secs(120)));
    }

    #[test]
    fn parses_minutes() {
        assert_eq!(parse("10m").unwrap(), RequestTimeout::Bounded(Duration::from_secs(600)));
    }

    #[test]
    fn unbounded_must_be_spelled_out() {
        assert_eq!(parse("unbounded").unwrap(), RequestTimeout::Unbounded);
        assert_eq!(parse("Unbounded").unwrap().as_duration(), None);
    }

    #[test]
    fn zero_is_rejected() {
        let err = parse("0s").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("soon").is_err());
    }
}
