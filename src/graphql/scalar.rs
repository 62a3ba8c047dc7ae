//! The `Date` scalar.
//!
//! Serializes to ISO-8601 with millisecond precision and a `Z`
//! suffix (`2024-06-01T00:00:00.000Z`), parses any RFC 3339 string.
//! Null handling lives at the field level via `Option<Date>`.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(pub DateTime<Utc>);

#[Scalar(name = "Date")]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .map(|parsed| Self(parsed.with_timezone(&Utc)))
                .map_err(|e| InputValueError::custom(format!("invalid ISO-8601 timestamp: {e}"))),
            other => Err(InputValueError::expected_type(other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}
