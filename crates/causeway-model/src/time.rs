// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ids::ParseError;

pub type Timestamp = DateTime<Utc>;

/// Canonical wire/storage form: RFC 3339, UTC, fixed microsecond precision.
///
/// Invariant: the fixed width makes lexicographic TEXT comparison in the
/// content database agree with chronological order, which the keyset
/// predicate depends on.
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(input: &str) -> Result<Timestamp, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty("timestamp"));
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ParseError::InvalidFormat("timestamp must be RFC 3339"))
}
