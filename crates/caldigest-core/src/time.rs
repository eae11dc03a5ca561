//! Sortable time codes for resolved events.
//!
//! Every event's displayed time reduces to one [`TimeCode`] so the digest
//! can order a mixed day with a single comparison: carried-over events
//! first, then all-day entries, then timed events by minute of day.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// The resolved display time of an event.
///
/// The two sentinels share the sort domain with real times but are kept
/// as explicit variants; the ordering below is the one place their
/// precedence is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TimeCode {
    /// The event started on an earlier day and continues into this one.
    Continued,
    /// An all-day entry with no usable start time.
    AllDay,
    /// Minute of the day, hour * 60 + minute.
    Minutes(u32),
}

impl TimeCode {
    /// Returns `true` for a real minute-of-day value.
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Minutes(_))
    }

    /// Returns the minute of day for timed codes.
    pub fn as_minutes(&self) -> Option<u32> {
        match self {
            Self::Minutes(minute) => Some(*minute),
            _ => None,
        }
    }
}

impl PartialOrd for TimeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCode {
    /// Total order: `Continued < AllDay < Minutes(m)`, minutes ascending.
    fn cmp(&self, other: &Self) -> Ordering {
        use TimeCode::{AllDay, Continued, Minutes};
        match (self, other) {
            (Continued, Continued) | (AllDay, AllDay) => Ordering::Equal,
            (Continued, _) => Ordering::Less,
            (_, Continued) => Ordering::Greater,
            (AllDay, _) => Ordering::Less,
            (_, AllDay) => Ordering::Greater,
            (Minutes(a), Minutes(b)) => a.cmp(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_sort_before_all_real_times() {
        assert!(TimeCode::Continued < TimeCode::AllDay);
        assert!(TimeCode::AllDay < TimeCode::Minutes(0));
        assert!(TimeCode::Continued < TimeCode::Minutes(0));
        assert!(TimeCode::Minutes(0) < TimeCode::Minutes(1439));
    }

    #[test]
    fn equal_codes_compare_equal() {
        assert_eq!(
            TimeCode::Minutes(600).cmp(&TimeCode::Minutes(600)),
            Ordering::Equal
        );
        assert_eq!(TimeCode::AllDay.cmp(&TimeCode::AllDay), Ordering::Equal);
        assert_eq!(
            TimeCode::Continued.cmp(&TimeCode::Continued),
            Ordering::Equal
        );
    }

    #[test]
    fn accessors() {
        assert!(TimeCode::Minutes(75).is_timed());
        assert_eq!(TimeCode::Minutes(75).as_minutes(), Some(75));
        assert!(!TimeCode::AllDay.is_timed());
        assert_eq!(TimeCode::Continued.as_minutes(), None);
    }

    #[test]
    fn serde_roundtrip() {
        for code in [
            TimeCode::Continued,
            TimeCode::AllDay,
            TimeCode::Minutes(1230),
        ] {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: TimeCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }
}
