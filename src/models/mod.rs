use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A bookable interval within one day, e.g. `09:00 - 10:00`.
///
/// Parsed once at the collection boundary so the rest of the pipeline
/// never has to pick times back out of formatted strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Parse `"HH:MM - HH:MM"`. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let (start, end) = s.split_once('-')?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
        Some(Self { start, end })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Zero-padded 24h times, so the textual sort order is chronological
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeRange::parse(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time range: {raw:?}")))
    }
}

/// One bookable court slot: when, what it costs, and where to book it.
///
/// Two slots are the same iff every field matches; a price change on the
/// same interval is a different slot as far as the diff is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: TimeRange,
    pub cost: String,
    pub url: String,
}

impl Slot {
    /// Build a slot, rejecting free or unpriced entries.
    ///
    /// Free courts don't need an alert, so they never enter a snapshot.
    pub fn paid(time: TimeRange, cost: &str, url: &str) -> Option<Self> {
        let cost = cost.trim();
        if cost.is_empty() || cost.eq_ignore_ascii_case("free") {
            return None;
        }
        Some(Self {
            time,
            cost: cost.to_string(),
            url: url.to_string(),
        })
    }
}

/// Slots observed for one park, keyed by date.
pub type SlotsByDate = BTreeMap<NaiveDate, Vec<Slot>>;

/// Everything observed across all parks at one point in time:
/// park → date → slots, in collection order within a date.
///
/// The diff result uses the same shape, with empty entries pruned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(pub BTreeMap<String, SlotsByDate>);

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a slot under a (park, date) pair.
    pub fn push(&mut self, location: &str, date: NaiveDate, slot: Slot) {
        self.0
            .entry(location.to_string())
            .or_default()
            .entry(date)
            .or_default()
            .push(slot);
    }

    /// The slots recorded for a (park, date) pair, if any.
    pub fn slots(&self, location: &str, date: NaiveDate) -> Option<&[Slot]> {
        self.0
            .get(location)
            .and_then(|dates| dates.get(&date))
            .map(Vec::as_slice)
    }

    pub fn slot_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|dates| dates.values())
            .map(Vec::len)
            .sum()
    }
}

/// A user's weekly availability allow-list:
/// park → full weekday name (`Monday` .. `Sunday`) → time-range strings.
///
/// A key missing at any level means "not wanted", never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferencePolicy(pub BTreeMap<String, BTreeMap<String, BTreeSet<String>>>);

impl PreferencePolicy {
    /// Membership is a pure lookup, not branching logic, so the matching
    /// rule stays auditable in one place.
    pub fn allows(&self, location: &str, weekday: &str, time: &str) -> bool {
        self.0
            .get(location)
            .and_then(|days| days.get(weekday))
            .is_some_and(|times| times.contains(time))
    }
}
