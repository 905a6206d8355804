//! Record identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Sequential identifier of a record within one resource type.
///
/// Identifiers are assigned by [`RecordTable`](crate::RecordTable) and start
/// at `1`. Zero never names a record but still parses, so a request for
/// `/tours/0` reaches the store and fails the existence check there.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// The identifier handed out by an empty table.
    pub const FIRST: RecordId = RecordId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier following this one; `None` once the id space is used up.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for u64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("RecordId '{s}': {e}")))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_ids() {
        assert_eq!("7".parse::<RecordId>().unwrap(), RecordId::new(7));
        assert_eq!("0".parse::<RecordId>().unwrap(), RecordId::new(0));
    }

    #[test]
    fn rejects_non_numeric_and_negative_ids() {
        for raw in ["abc", "-1", "1.5", ""] {
            match raw.parse::<RecordId>() {
                Err(DomainError::InvalidId(_)) => {}
                other => panic!("expected InvalidId for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn next_stops_at_the_largest_id() {
        assert_eq!(RecordId::new(41).next(), Some(RecordId::new(42)));
        assert_eq!(RecordId::new(u64::MAX).next(), None);
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&RecordId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
